use super::model::BrowserCount;
use crate::parser::model::LogRecord;

pub const UNKNOWN: &str = "Unknown";

/// Ordered classification rules. Substring overlap between user-agent
/// families makes matching order-sensitive: Edge and Opera strings contain
/// "Chrome" and "Safari" tokens, Chrome strings contain "Safari", and
/// crawler strings often embed a full browser signature. Bot rules run
/// first, then engines from most to least specific.
const RULES: &[(&str, &[&str])] = &[
    ("Facebook Bot", &["facebookexternalhit", "facebot"]),
    ("Bot/Crawler", &["bot", "crawler", "spider"]),
    ("Edge", &["edg/", "edge/"]),
    ("Opera", &["opr/", "opera"]),
    ("Chrome", &["chrome/", "chromium/", "crios/"]),
    ("Safari", &["safari/"]),
    ("Firefox", &["firefox/", "fxios/"]),
];

/// Map a raw user-agent string onto a coarse browser category.
/// Empty or unrecognized agents classify as `Unknown`.
pub fn classify(user_agent: &str) -> &'static str {
    if user_agent.is_empty() {
        return UNKNOWN;
    }
    let ua = user_agent.to_ascii_lowercase();
    for (name, needles) in RULES {
        if needles.iter().any(|needle| ua.contains(needle)) {
            return name;
        }
    }
    UNKNOWN
}

/// Accumulate per-category counts in first-seen insertion order, so
/// iteration is deterministic for rendering.
pub fn browser_distribution(records: &[LogRecord]) -> Vec<BrowserCount> {
    let mut out: Vec<BrowserCount> = Vec::new();
    for record in records {
        let name = classify(&record.user_agent);
        match out.iter_mut().find(|b| b.name == name) {
            Some(existing) => existing.count += 1,
            None => out.push(BrowserCount { name, count: 1 }),
        }
    }
    out
}
