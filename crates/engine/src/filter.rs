//! Filter — optional predicates narrowing a record set before aggregation.

use chrono::{NaiveDate, Timelike};
use std::net::IpAddr;

use crate::parser::model::LogRecord;
use crate::stats::browser;

/// Conjunction of optional predicates. An unset filter keeps everything.
/// Date and hour are evaluated in each record's own offset, matching how
/// the aggregator buckets time.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub date: Option<NaiveDate>,
    pub hour: Option<u32>,
    pub client: Option<IpAddr>,
    pub browser: Option<String>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.hour.is_none() && self.client.is_none() && self.browser.is_none()
    }

    pub fn matches(&self, record: &LogRecord) -> bool {
        if let Some(date) = self.date {
            if record.timestamp.date_naive() != date {
                return false;
            }
        }
        if let Some(hour) = self.hour {
            if record.timestamp.hour() != hour {
                return false;
            }
        }
        if let Some(client) = self.client {
            if record.client_addr != client {
                return false;
            }
        }
        if let Some(browser) = &self.browser {
            if browser::classify(&record.user_agent) != browser.as_str() {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, records: &[LogRecord]) -> Vec<LogRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}
