/// Aggregation — pure functions from a record set to its derived views.
///
/// - `buckets.rs`: contiguous time-bucketed request counts
/// - `clients.rs`: top-N client ranking
/// - `browser.rs`: ordered-rule browser classification
/// - `model.rs`: the view types
///
/// Nothing here holds state between calls; summarizing the same records
/// twice yields identical views, and callers may run aggregations
/// concurrently over their own record sets without locking.
pub mod browser;
pub mod buckets;
pub mod clients;
pub mod model;

use std::collections::HashSet;

pub use browser::classify;
pub use model::{BrowserCount, BucketCount, ClientCount, Granularity, Overview, SummaryView};

use crate::parser::model::LogRecord;

/// Roll a record set up into all three summary views.
pub fn summarize(records: &[LogRecord], granularity: Granularity, top_n: usize) -> SummaryView {
    SummaryView {
        buckets: buckets::bucket_counts(records, granularity),
        top_clients: clients::top_clients(records, top_n),
        browsers: browser::browser_distribution(records),
    }
}

/// Headline figures: totals, distinct clients, observed time range.
pub fn overview(records: &[LogRecord]) -> Overview {
    let unique_clients = records
        .iter()
        .map(|r| r.client_addr)
        .collect::<HashSet<_>>()
        .len();
    Overview {
        total_records: records.len(),
        unique_clients,
        first_seen: records.iter().map(|r| r.timestamp).min(),
        last_seen: records.iter().map(|r| r.timestamp).max(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_line, LogFormat};

    fn records_from(lines: &[String]) -> Vec<LogRecord> {
        lines
            .iter()
            .map(|l| parse_line(l, LogFormat::Combined).unwrap())
            .collect()
    }

    fn line(addr: &str, stamp: &str, ua: &str) -> String {
        format!("{addr} - - [{stamp}] \"GET / HTTP/1.1\" 200 100 \"-\" \"{ua}\"")
    }

    #[test]
    fn scenario_three_records_two_buckets_apart() {
        // 09:10, 09:40, 11:05 same day, hourly -> (09:00, 2), (10:00, 0), (11:00, 1)
        let records = records_from(&[
            line("10.0.0.1", "10/Oct/2023:09:10:00 +0000", "curl/8"),
            line("10.0.0.2", "10/Oct/2023:09:40:00 +0000", "curl/8"),
            line("10.0.0.3", "10/Oct/2023:11:05:00 +0000", "curl/8"),
        ]);

        let view = summarize(&records, Granularity::Hourly, 10);
        let counts: Vec<u64> = view.buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 0, 1]);
    }

    #[test]
    fn bucket_counts_sum_to_record_count() {
        let records = records_from(&[
            line("10.0.0.1", "10/Oct/2023:01:00:00 +0000", ""),
            line("10.0.0.1", "10/Oct/2023:05:30:00 +0000", ""),
            line("10.0.0.1", "11/Oct/2023:23:59:59 +0000", ""),
        ]);

        for granularity in [Granularity::Hourly, Granularity::Daily] {
            let view = summarize(&records, granularity, 10);
            let total: u64 = view.buckets.iter().map(|b| b.count).sum();
            assert_eq!(total as usize, records.len());
        }
    }

    #[test]
    fn summarize_is_idempotent() {
        let records = records_from(&[
            line("10.0.0.1", "10/Oct/2023:09:10:00 +0000", "Firefox/110.0"),
            line("10.0.0.2", "10/Oct/2023:12:00:00 +0000", ""),
        ]);

        let a = summarize(&records, Granularity::Hourly, 5);
        let b = summarize(&records, Granularity::Hourly, 5);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_input_yields_empty_views() {
        let view = summarize(&[], Granularity::Hourly, 10);
        assert!(view.buckets.is_empty());
        assert!(view.top_clients.is_empty());
        assert!(view.browsers.is_empty());

        let stats = overview(&[]);
        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.unique_clients, 0);
        assert!(stats.first_seen.is_none());
        assert!(stats.last_seen.is_none());
    }

    #[test]
    fn overview_counts_distinct_clients_and_range() {
        let records = records_from(&[
            line("10.0.0.1", "10/Oct/2023:09:00:00 +0000", ""),
            line("10.0.0.2", "10/Oct/2023:11:00:00 +0000", ""),
            line("10.0.0.1", "10/Oct/2023:10:00:00 +0000", ""),
        ]);

        let stats = overview(&records);
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.unique_clients, 2);
        assert_eq!(stats.first_seen, Some(records[0].timestamp));
        assert_eq!(stats.last_seen, Some(records[1].timestamp));
    }

    #[test]
    fn summary_view_serializes_for_the_presentation_layer() {
        let records = records_from(&[line("10.0.0.1", "10/Oct/2023:09:10:00 +0000", "curl/8")]);
        let view = summarize(&records, Granularity::Hourly, 5);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["top_clients"][0]["addr"], "10.0.0.1");
        assert_eq!(json["buckets"][0]["count"], 1);
        assert_eq!(json["browsers"][0]["name"], "Unknown");
    }
}
