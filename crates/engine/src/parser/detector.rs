use super::line::parse_line;
use super::model::{FormatDetectionError, LogFormat};

/// Detect a source's format from a sample of its lines.
///
/// Examines up to `sample_size` non-blank lines. Both grammars are exact,
/// so the line parser itself is the detection oracle: the first
/// sampled line that parses with the combined tail settles the question.
/// A line without the tail only proves Common if no later sampled line
/// carries one.
pub fn detect_format<'a, I>(lines: I, sample_size: usize) -> Result<LogFormat, FormatDetectionError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sampled = 0;
    let mut common_seen = false;

    for line in lines.into_iter().filter(|l| !l.trim().is_empty()) {
        if sampled >= sample_size {
            break;
        }
        sampled += 1;

        if parse_line(line, LogFormat::Combined).is_ok() {
            return Ok(LogFormat::Combined);
        }
        if parse_line(line, LogFormat::Common).is_ok() {
            common_seen = true;
        }
    }

    if common_seen {
        Ok(LogFormat::Common)
    } else if sampled == 0 {
        Err(FormatDetectionError::EmptySample)
    } else {
        Err(FormatDetectionError::NoMatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::DETECTION_SAMPLE_SIZE;

    const COMMON: &str =
        "127.0.0.1 - - [10/Oct/2023:13:55:36 -0700] \"GET /index.html HTTP/1.1\" 200 2326";
    const COMBINED: &str = "127.0.0.1 - - [10/Oct/2023:13:55:36 -0700] \"GET / HTTP/1.1\" 200 2326 \"-\" \"Mozilla/5.0\"";

    #[test]
    fn detect_common() {
        let result = detect_format([COMMON, COMMON], DETECTION_SAMPLE_SIZE);
        assert_eq!(result, Ok(LogFormat::Common));
    }

    #[test]
    fn detect_combined() {
        let result = detect_format([COMBINED], DETECTION_SAMPLE_SIZE);
        assert_eq!(result, Ok(LogFormat::Combined));
    }

    #[test]
    fn one_combined_line_settles_detection() {
        // Common-looking lines first; a combined tail later in the sample wins.
        let result = detect_format([COMMON, COMMON, COMBINED], DETECTION_SAMPLE_SIZE);
        assert_eq!(result, Ok(LogFormat::Combined));
    }

    #[test]
    fn blank_lines_are_not_sampled() {
        let result = detect_format(["", "   ", COMBINED], DETECTION_SAMPLE_SIZE);
        assert_eq!(result, Ok(LogFormat::Combined));
    }

    #[test]
    fn empty_sample_is_an_error() {
        let result = detect_format(["", "  "], DETECTION_SAMPLE_SIZE);
        assert_eq!(result, Err(FormatDetectionError::EmptySample));
    }

    #[test]
    fn garbage_is_no_match() {
        let result = detect_format(["not a log line", "neither is this"], DETECTION_SAMPLE_SIZE);
        assert_eq!(result, Err(FormatDetectionError::NoMatch));
    }

    #[test]
    fn lines_beyond_sample_size_are_ignored() {
        // The combined line sits past the sample window.
        let result = detect_format([COMMON, COMMON, COMBINED], 2);
        assert_eq!(result, Ok(LogFormat::Common));
    }
}
