/// Access-log line grammar
///
/// Converts raw log lines into structured records:
///
/// - `model.rs`: record and result types, typed rejection reasons
/// - `detector.rs`: sample-based format detection (Common vs Combined)
/// - `line.rs`: the sequential line parser
///
/// Parsing is tolerant by construction: a garbled line is reported as a
/// `MalformedLine` value, never a panic or an early abort, so large files
/// with a few bad entries still produce useful summaries.
pub mod detector;
pub mod line;
pub mod model;

// Re-export commonly used types
pub use detector::detect_format;
pub use line::parse_line;
pub use model::{FormatDetectionError, LogFormat, LogRecord, MalformedLine, ParseResult};

// Constants
pub const DETECTION_SAMPLE_SIZE: usize = 5; // Non-blank lines sampled for detection

/// Bracketed timestamp layout, e.g. `10/Oct/2023:13:55:36 -0700`
pub const TIMESTAMP_LAYOUT: &str = "%d/%b/%Y:%H:%M:%S %z";
