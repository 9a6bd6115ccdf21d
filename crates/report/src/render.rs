//! Render — plain-text tables for the summary views.
//!
//! All functions build strings; main decides where they go. Chart-quality
//! output is the excluded presentation layer's job, not ours — this is the
//! terminal stand-in.

use std::fmt::Write as _;

use engine::loader::{FileReport, LoadError, MixedFormatWarning};
use engine::stats::{Granularity, Overview, SummaryView};

const BAR_WIDTH: usize = 30;

pub fn render_files(
    loaded: &[FileReport],
    failed: &[(String, LoadError)],
    mixed: Option<&MixedFormatWarning>,
) -> String {
    let mut out = String::new();

    let total = loaded.len() + failed.len();
    let _ = writeln!(out, "Sources: {} of {} loaded", loaded.len(), total);
    for file in loaded {
        let _ = writeln!(
            out,
            "  {:<24} {:<8} {} records, {} malformed",
            file.name,
            file.format.as_str(),
            file.records,
            file.malformed
        );
    }
    for (name, error) in failed {
        let _ = writeln!(out, "  {:<24} failed: {}", name, error);
    }
    if let Some(warning) = mixed {
        let _ = writeln!(out, "  warning: {warning}");
    }

    out
}

pub fn render_overview(overview: &Overview) -> String {
    let mut out = String::new();

    let _ = write!(
        out,
        "Requests: {} | unique clients: {}",
        overview.total_records, overview.unique_clients
    );
    if let (Some(first), Some(last)) = (overview.first_seen, overview.last_seen) {
        let _ = write!(
            out,
            " | {} .. {}",
            first.format("%Y-%m-%d %H:%M:%S %:z"),
            last.format("%Y-%m-%d %H:%M:%S %:z")
        );
    }
    out.push('\n');

    out
}

pub fn render_summary(view: &SummaryView, granularity: Granularity) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Traffic ({})", granularity.as_str());
    if view.buckets.is_empty() {
        out.push_str("  <no data>\n");
    } else {
        let max = view.buckets.iter().map(|b| b.count).max().unwrap_or(1).max(1);
        for bucket in &view.buckets {
            let label = match granularity {
                Granularity::Hourly => bucket.start.format("%Y-%m-%d %H:%M %:z").to_string(),
                Granularity::Daily => bucket.start.format("%Y-%m-%d").to_string(),
            };
            let _ = writeln!(
                out,
                "  {:<22} {:<width$} {}",
                label,
                bar(bucket.count, max),
                bucket.count,
                width = BAR_WIDTH
            );
        }
    }

    let _ = writeln!(out, "\nTop clients");
    if view.top_clients.is_empty() {
        out.push_str("  <no data>\n");
    }
    for client in &view.top_clients {
        let _ = writeln!(out, "  {:<40} {}", client.addr, client.count);
    }

    let total_agents: u64 = view.browsers.iter().map(|b| b.count).sum();
    let _ = writeln!(out, "\nBrowsers");
    if view.browsers.is_empty() {
        out.push_str("  <no data>\n");
    }
    for browser in &view.browsers {
        let pct = (browser.count as f64 / total_agents as f64) * 100.0;
        let _ = writeln!(out, "  {:<14} {:>7} {:>5.1}%", browser.name, browser.count, pct);
    }

    out
}

fn bar(count: u64, max: u64) -> String {
    if count == 0 {
        return String::new();
    }
    let width = ((count as f64 / max as f64) * BAR_WIDTH as f64).ceil() as usize;
    "█".repeat(width.clamp(1, BAR_WIDTH))
}
