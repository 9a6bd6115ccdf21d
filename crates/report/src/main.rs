mod config;
mod discover;
mod render;

use std::fs::File;
use std::io::BufReader;
use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde_json::json;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use engine::filter::RecordFilter;
use engine::loader::load_sources;
use engine::stats::{self, Granularity};

use crate::config::ReportConfig;

#[derive(Parser, Debug)]
#[command(
    name = "report",
    version,
    about = "Summarize web-server access logs: traffic over time, top clients, browsers"
)]
struct Cli {
    /// Log files or directories; defaults to the configured logs directory
    inputs: Vec<PathBuf>,

    /// Time bucket width for the traffic view
    #[arg(long, value_enum, default_value = "hourly")]
    granularity: GranularityArg,

    /// How many top clients to list
    #[arg(long)]
    top: Option<usize>,

    /// Non-blank lines sampled per file for format detection
    #[arg(long)]
    sample: Option<usize>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Keep only records on this date (YYYY-MM-DD, log-local)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Keep only records in this hour of day (0-23, log-local)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=23))]
    hour: Option<u32>,

    /// Keep only records from this client address
    #[arg(long)]
    client: Option<IpAddr>,

    /// Keep only records in this browser category (e.g. Firefox, Bot/Crawler)
    #[arg(long)]
    browser: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GranularityArg {
    Hourly,
    Daily,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Hourly => Granularity::Hourly,
            GranularityArg::Daily => Granularity::Daily,
        }
    }
}

/// Initialise the tracing / logging subsystem.
/// Diagnostics go to stderr; stdout is reserved for the report itself.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "report=info,engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = ReportConfig::load()?;
    config.validate().map_err(anyhow::Error::msg)?;

    let files = collect_inputs(&cli, &config)?;
    if files.is_empty() {
        bail!("no log files found");
    }

    let sample_size = cli.sample.unwrap_or(config.detect_sample);
    let mut sources = Vec::with_capacity(files.len());
    for path in &files {
        let file =
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        sources.push((path.display().to_string(), BufReader::new(file)));
    }

    let mut report = load_sources(sources, sample_size);
    if report.loaded.is_empty() {
        for (name, error) in &report.failed {
            eprintln!("{name}: {error}");
        }
        bail!("no files could be analyzed");
    }

    if report.records.len() > config.max_entries {
        info!(limit = config.max_entries, "truncating record set");
        report.records.truncate(config.max_entries);
    }

    let filter = RecordFilter {
        date: cli.date,
        hour: cli.hour,
        client: cli.client,
        browser: cli.browser.clone(),
    };
    let records = if filter.is_empty() {
        std::mem::take(&mut report.records)
    } else {
        filter.apply(&report.records)
    };

    let granularity: Granularity = cli.granularity.into();
    let top_n = cli.top.unwrap_or(config.top_clients);
    let view = stats::summarize(&records, granularity, top_n);
    let overview = stats::overview(&records);

    if cli.json {
        let failed: Vec<_> = report
            .failed
            .iter()
            .map(|(name, error)| json!({ "name": name, "error": error.to_string() }))
            .collect();
        let payload = json!({
            "overview": overview,
            "summary": view,
            "granularity": granularity,
            "files": {
                "loaded": report.loaded,
                "failed": failed,
                "mixed_format": report.mixed_format,
            },
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print!(
            "{}",
            render::render_files(&report.loaded, &report.failed, report.mixed_format.as_ref())
        );
        print!("{}", render::render_overview(&overview));
        println!();
        print!("{}", render::render_summary(&view, granularity));
    }

    Ok(())
}

/// Expand the CLI inputs into a flat file list; directories are scanned
/// with the discovery heuristic, explicit files are taken as-is.
fn collect_inputs(cli: &Cli, config: &ReportConfig) -> Result<Vec<PathBuf>> {
    let inputs = if cli.inputs.is_empty() {
        vec![PathBuf::from(&config.logs_dir)]
    } else {
        cli.inputs.clone()
    };

    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = discover::find_log_files(&input)
                .with_context(|| format!("cannot scan {}", input.display()))?;
            info!(dir = %input.display(), files = found.len(), "scanned log directory");
            files.extend(found);
        } else {
            files.push(input);
        }
    }
    Ok(files)
}
