use chrono::{DateTime, Duration, FixedOffset};
use serde::Serialize;
use std::net::IpAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Hourly,
    Daily,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Hourly => "hourly",
            Granularity::Daily => "daily",
        }
    }

    /// Width of one bucket.
    pub(crate) fn step(&self) -> Duration {
        match self {
            Granularity::Hourly => Duration::hours(1),
            Granularity::Daily => Duration::days(1),
        }
    }
}

/// One time bucket: the truncated start (in the contributing records' own
/// offset) and how many requests fell into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketCount {
    pub start: DateTime<FixedOffset>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientCount {
    pub addr: IpAddr,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserCount {
    pub name: &'static str,
    pub count: u64,
}

/// The derived views, all pure functions of the record set they were
/// computed from. Empty input produces empty collections; callers handle
/// the no-data case explicitly, it is not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    /// Ascending by bucket start, contiguous (gaps synthesized with count 0)
    pub buckets: Vec<BucketCount>,

    /// Descending by count; ties broken by first occurrence in the records
    pub top_clients: Vec<ClientCount>,

    /// First-seen insertion order
    pub browsers: Vec<BrowserCount>,
}

/// Headline figures for a record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_records: usize,
    pub unique_clients: usize,
    pub first_seen: Option<DateTime<FixedOffset>>,
    pub last_seen: Option<DateTime<FixedOffset>>,
}
