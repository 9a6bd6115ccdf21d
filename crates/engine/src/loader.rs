//! Loader — turns already-opened sources into ParseResults.
//!
//! Detection runs once per source on a sample of its own lines; every line
//! is then parsed under the detected format. Reading whole sources into
//! memory is an accepted constraint of the design (single-host log review),
//! not a defect.

use std::fmt;
use std::io::BufRead;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::parser::model::{FormatDetectionError, LogFormat, LogRecord, MalformedLine, ParseResult};
use crate::parser::{detect_format, parse_line};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Detect(#[from] FormatDetectionError),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-file slice of a multi-source load.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub name: String,
    pub format: LogFormat,
    pub records: usize,
    pub malformed: u64,
}

/// Informational: loaded sources disagree on format. Aggregation proceeds;
/// every record is format-agnostic once parsed.
#[derive(Debug, Clone, Serialize)]
pub struct MixedFormatWarning {
    pub files: Vec<(String, LogFormat)>,
}

impl fmt::Display for MixedFormatWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sources disagree on log format:")?;
        for (name, format) in &self.files {
            write!(f, " {}={}", name, format.as_str())?;
        }
        Ok(())
    }
}

/// Combined outcome of a multi-source load: concatenated records in
/// file-argument order, per-file reports, and the per-file error list.
/// One failed source never blocks the others.
#[derive(Debug)]
pub struct LoadReport {
    pub records: Vec<LogRecord>,
    pub malformed: u64,
    pub loaded: Vec<FileReport>,
    pub failed: Vec<(String, LoadError)>,
    pub mixed_format: Option<MixedFormatWarning>,
}

/// Load a single source: detect its format from the leading sample, then
/// parse every line, counting the malformed ones.
///
/// A source with no non-blank lines yields an empty ParseResult rather than
/// a detection error: "empty file" and "cannot analyze this file" are
/// different answers.
pub fn load_source<R: BufRead>(reader: R, sample_size: usize) -> Result<ParseResult, LoadError> {
    // Buffer all lines up front; a line that is not valid UTF-8 is malformed
    // data, not a fatal load error.
    let mut lines: Vec<Result<String, ()>> = Vec::new();
    for segment in reader.split(b'\n') {
        let mut raw = segment?;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        match String::from_utf8(raw) {
            Ok(text) => lines.push(Ok(text)),
            Err(_) => lines.push(Err(())),
        }
    }

    let format = match detect_format(
        lines.iter().filter_map(|l| l.as_deref().ok()),
        sample_size,
    ) {
        Ok(format) => format,
        Err(FormatDetectionError::EmptySample) => {
            // Non-UTF8 lines never reach the sample; if any exist the source
            // has content we cannot analyze.
            if lines.iter().any(|l| l.is_err()) {
                return Err(FormatDetectionError::NoMatch.into());
            }
            return Ok(ParseResult {
                records: Vec::new(),
                malformed: 0,
                format: LogFormat::Common,
            });
        }
        Err(e) => return Err(e.into()),
    };

    let mut records = Vec::new();
    let mut malformed = 0u64;

    for line in &lines {
        match line {
            Ok(text) => {
                if text.trim().is_empty() {
                    continue;
                }
                match parse_line(text, format) {
                    Ok(record) => records.push(record),
                    Err(reason) => {
                        malformed += 1;
                        debug!(%reason, "rejected line");
                    }
                }
            }
            Err(()) => {
                malformed += 1;
                debug!(reason = %MalformedLine::NonUtf8, "rejected line");
            }
        }
    }

    Ok(ParseResult {
        records,
        malformed,
        format,
    })
}

/// Load several sources in argument order. Detection failures land in
/// `failed`; everything else is concatenated preserving per-file line order.
pub fn load_sources<R, I>(sources: I, sample_size: usize) -> LoadReport
where
    R: BufRead,
    I: IntoIterator<Item = (String, R)>,
{
    let mut report = LoadReport {
        records: Vec::new(),
        malformed: 0,
        loaded: Vec::new(),
        failed: Vec::new(),
        mixed_format: None,
    };

    for (name, reader) in sources {
        match load_source(reader, sample_size) {
            Ok(mut result) => {
                info!(
                    file = %name,
                    format = result.format.as_str(),
                    records = result.records.len(),
                    malformed = result.malformed,
                    "loaded source"
                );
                report.loaded.push(FileReport {
                    name,
                    format: result.format,
                    records: result.records.len(),
                    malformed: result.malformed,
                });
                report.malformed += result.malformed;
                report.records.append(&mut result.records);
            }
            Err(e) => {
                warn!(file = %name, error = %e, "failed to load source");
                report.failed.push((name, e));
            }
        }
    }

    // Empty sources carry no format evidence and cannot cause a mismatch.
    let evidential: Vec<&FileReport> = report
        .loaded
        .iter()
        .filter(|f| f.records > 0 || f.malformed > 0)
        .collect();
    if let Some(first) = evidential.first() {
        if evidential.iter().any(|f| f.format != first.format) {
            let warning = MixedFormatWarning {
                files: evidential
                    .iter()
                    .map(|f| (f.name.clone(), f.format))
                    .collect(),
            };
            warn!(%warning, "continuing with mixed formats");
            report.mixed_format = Some(warning);
        }
    }

    report
}
