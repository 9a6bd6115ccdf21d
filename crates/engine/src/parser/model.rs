use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::net::IpAddr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Common log format: address, identity, user, timestamp, request, status, size
    Common,
    /// Common format plus quoted referrer and user-agent fields
    Combined,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Common => "common",
            LogFormat::Combined => "combined",
        }
    }
}

/// One successfully parsed access-log line.
///
/// Only constructed once every required field parses; partial records are
/// never emitted; the line is counted as malformed instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Client address from the leading token
    pub client_addr: IpAddr,

    /// Timestamp with the offset exactly as written in the log
    pub timestamp: DateTime<FixedOffset>,

    /// HTTP method, accepted verbatim (unknown verbs are not a parse failure)
    pub method: String,

    /// Request target
    pub path: String,

    /// Protocol token from the request line (e.g. HTTP/1.1)
    pub protocol: String,

    /// Status code, 100-599
    pub status: u16,

    /// Response size in bytes; a literal `-` in the log encodes 0
    pub bytes: u64,

    /// Empty for Common format; `-` normalizes to empty
    pub referrer: String,

    /// Empty for Common format; `-` normalizes to empty
    pub user_agent: String,
}

/// Result of loading one source: records in line order plus the count of
/// lines that failed parsing. Malformed lines are data, not errors: a file
/// where every line is garbled still yields a valid (empty) result,
/// distinguishing "badly formatted" from "empty".
#[derive(Debug, Clone, Serialize)]
pub struct ParseResult {
    pub records: Vec<LogRecord>,
    pub malformed: u64,
    pub format: LogFormat,
}

/// Why a single line was rejected. Carried as data by the loader; never
/// aborts a load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedLine {
    #[error("invalid client address: {0}")]
    BadAddress(String),

    #[error("missing or unterminated timestamp bracket")]
    MissingTimestamp,

    #[error("invalid timestamp: {0}")]
    BadTimestamp(String),

    #[error("missing or unterminated request quote")]
    MissingRequest,

    #[error("request line has fewer than 3 tokens")]
    ShortRequest,

    #[error("invalid status code: {0}")]
    BadStatus(String),

    #[error("invalid response size: {0}")]
    BadSize(String),

    #[error("combined format line is missing referrer or user-agent")]
    MissingCombinedTail,

    #[error("non-UTF8 content")]
    NonUtf8,
}

/// Detection failure is fatal for the file it came from: no ParseResult is
/// produced and callers must surface it rather than treat the file as empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatDetectionError {
    #[error("no lines available for format detection")]
    EmptySample,

    #[error("no sampled line matches a supported log format")]
    NoMatch,
}
