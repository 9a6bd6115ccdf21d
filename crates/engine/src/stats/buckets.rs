use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Timelike};

use super::model::{BucketCount, Granularity};
use crate::parser::model::LogRecord;

/// Truncate a timestamp to its bucket start, keeping the record's own
/// offset. Bucket boundaries therefore match the log's local time as
/// written, not UTC.
pub(crate) fn truncate(
    ts: DateTime<FixedOffset>,
    granularity: Granularity,
) -> DateTime<FixedOffset> {
    // Fixed offsets have no invalid or ambiguous wall times, so the
    // with_* calls cannot fail.
    let hour = ts
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .expect("fixed-offset truncation is infallible");
    match granularity {
        Granularity::Hourly => hour,
        Granularity::Daily => hour
            .with_hour(0)
            .expect("fixed-offset truncation is infallible"),
    }
}

/// Count records per time bucket, ascending, with zero-count buckets
/// synthesized between occupied ones so the sequence is contiguous and
/// chartable without caller-side gap filling.
pub fn bucket_counts(records: &[LogRecord], granularity: Granularity) -> Vec<BucketCount> {
    let mut counts: BTreeMap<DateTime<FixedOffset>, u64> = BTreeMap::new();
    for record in records {
        *counts
            .entry(truncate(record.timestamp, granularity))
            .or_insert(0) += 1;
    }

    let step = granularity.step();
    let mut out: Vec<BucketCount> = Vec::with_capacity(counts.len());
    for (start, count) in counts {
        if let Some(prev) = out.last() {
            // Step from the previous bucket, inheriting its offset; stop
            // before overshooting so mixed offsets cannot misalign the fill.
            let mut cursor = prev.start + step;
            while cursor < start {
                out.push(BucketCount { start: cursor, count: 0 });
                cursor = cursor + step;
            }
        }
        out.push(BucketCount { start, count });
    }
    out
}
