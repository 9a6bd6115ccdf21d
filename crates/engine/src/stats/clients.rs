use std::collections::HashMap;
use std::net::IpAddr;

use super::model::ClientCount;
use crate::parser::model::LogRecord;

/// Count requests per client address and keep the `top_n` busiest.
/// Ties rank by the address's first occurrence in the record sequence, so
/// the ordering is stable across runs.
pub fn top_clients(records: &[LogRecord], top_n: usize) -> Vec<ClientCount> {
    let mut counts: HashMap<IpAddr, (usize, u64)> = HashMap::new();
    for (index, record) in records.iter().enumerate() {
        counts.entry(record.client_addr).or_insert((index, 0)).1 += 1;
    }

    let mut ranked: Vec<(IpAddr, (usize, u64))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .1.cmp(&a.1 .1).then(a.1 .0.cmp(&b.1 .0)));

    ranked
        .into_iter()
        .take(top_n)
        .map(|(addr, (_, count))| ClientCount { addr, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn record_from(addr: &str) -> LogRecord {
        LogRecord {
            client_addr: addr.parse().unwrap(),
            timestamp: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2023, 10, 10, 12, 0, 0)
                .unwrap(),
            method: "GET".to_string(),
            path: "/".to_string(),
            protocol: "HTTP/1.1".to_string(),
            status: 200,
            bytes: 0,
            referrer: String::new(),
            user_agent: String::new(),
        }
    }

    #[test]
    fn orders_by_count_descending() {
        let records: Vec<LogRecord> = ["10.0.0.1", "10.0.0.2", "10.0.0.2", "10.0.0.2", "10.0.0.1"]
            .iter()
            .map(|a| record_from(a))
            .collect();

        let top = top_clients(&records, 10);
        assert_eq!(top[0].addr.to_string(), "10.0.0.2");
        assert_eq!(top[0].count, 3);
        assert_eq!(top[1].addr.to_string(), "10.0.0.1");
        assert_eq!(top[1].count, 2);
    }

    #[test]
    fn ties_break_by_first_seen_order() {
        let records: Vec<LogRecord> = ["10.0.0.9", "10.0.0.1", "10.0.0.9", "10.0.0.1"]
            .iter()
            .map(|a| record_from(a))
            .collect();

        let top = top_clients(&records, 2);
        assert_eq!(top[0].addr.to_string(), "10.0.0.9");
        assert_eq!(top[1].addr.to_string(), "10.0.0.1");
    }

    #[test]
    fn fewer_distinct_than_requested_returns_all() {
        let records = vec![record_from("10.0.0.1"), record_from("10.0.0.2")];
        let top = top_clients(&records, 20);
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn counts_sum_to_record_count_when_unbounded() {
        let records: Vec<LogRecord> = ["1.1.1.1", "2.2.2.2", "1.1.1.1", "3.3.3.3", "1.1.1.1"]
            .iter()
            .map(|a| record_from(a))
            .collect();

        let top = top_clients(&records, records.len());
        let total: u64 = top.iter().map(|c| c.count).sum();
        assert_eq!(total as usize, records.len());
    }

    #[test]
    fn zero_top_n_returns_nothing() {
        let records = vec![record_from("10.0.0.1")];
        assert!(top_clients(&records, 0).is_empty());
    }

    #[test]
    fn empty_records_empty_ranking() {
        assert!(top_clients(&[], 5).is_empty());
    }
}
