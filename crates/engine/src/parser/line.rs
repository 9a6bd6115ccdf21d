use super::model::{LogFormat, LogRecord, MalformedLine};
use super::TIMESTAMP_LAYOUT;
use chrono::DateTime;
use std::net::IpAddr;

/// Parse one raw log line under the selected format.
///
/// A linear scanner over the line's delimiters (' ', '[', '"'). Each step
/// fails independently with the reason the line was rejected:
///
/// ```text
/// 127.0.0.1 - - [10/Oct/2023:13:55:36 -0700] "GET /index.html HTTP/1.1" 200 2326
/// 127.0.0.1 - - [10/Oct/2023:13:55:36 -0700] "GET / HTTP/1.1" 200 512 "ref" "ua"
/// ```
pub fn parse_line(line: &str, format: LogFormat) -> Result<LogRecord, MalformedLine> {
    let text = line.trim();

    // 1. Leading client address token, up to the first whitespace
    let addr_token = text.split_whitespace().next().unwrap_or("");
    let client_addr: IpAddr = addr_token
        .parse()
        .map_err(|_| MalformedLine::BadAddress(addr_token.to_string()))?;

    // 2. Bracketed timestamp with the fixed layout; chrono rejects invalid
    //    calendar values (month 13, hour 25) for us
    let open = text.find('[').ok_or(MalformedLine::MissingTimestamp)?;
    let close = text[open..]
        .find(']')
        .map(|i| open + i)
        .ok_or(MalformedLine::MissingTimestamp)?;
    let stamp = &text[open + 1..close];
    let timestamp = DateTime::parse_from_str(stamp, TIMESTAMP_LAYOUT)
        .map_err(|_| MalformedLine::BadTimestamp(stamp.to_string()))?;

    // 3. Quoted request line: method, path, protocol
    let after_bracket = &text[close + 1..];
    let quote_start = after_bracket
        .find('"')
        .ok_or(MalformedLine::MissingRequest)?;
    let request_str = &after_bracket[quote_start + 1..];
    let quote_end = request_str.find('"').ok_or(MalformedLine::MissingRequest)?;
    let request_line = &request_str[..quote_end];
    let after_request = &request_str[quote_end + 1..];

    // Method and path are single tokens; the protocol keeps the remainder.
    // Unknown methods are accepted verbatim (custom verbs are not a parse
    // failure), but fewer than three tokens is.
    let mut req_parts = request_line.splitn(3, ' ');
    let (method, path, protocol) = match (req_parts.next(), req_parts.next(), req_parts.next()) {
        (Some(m), Some(p), Some(v)) if !m.is_empty() && !p.is_empty() && !v.is_empty() => (m, p, v),
        _ => return Err(MalformedLine::ShortRequest),
    };

    // 4. Status code, three digits in [100, 599]
    let (status_token, rest) = next_token(after_request);
    let status: u16 = status_token
        .parse()
        .map_err(|_| MalformedLine::BadStatus(status_token.to_string()))?;
    if !(100..=599).contains(&status) {
        return Err(MalformedLine::BadStatus(status_token.to_string()));
    }

    // 5. Response size; a literal `-` encodes 0
    let (size_token, rest) = next_token(rest);
    let bytes: u64 = if size_token == "-" {
        0
    } else {
        size_token
            .parse()
            .map_err(|_| MalformedLine::BadSize(size_token.to_string()))?
    };

    // 6. Combined format carries two further quoted fields
    let (referrer, user_agent) = match format {
        LogFormat::Common => (String::new(), String::new()),
        LogFormat::Combined => {
            let mut chars = rest.chars();
            let referrer = next_quoted(&mut chars).ok_or(MalformedLine::MissingCombinedTail)?;
            let user_agent = next_quoted(&mut chars).ok_or(MalformedLine::MissingCombinedTail)?;
            (dash_to_empty(referrer), dash_to_empty(user_agent))
        }
    };

    Ok(LogRecord {
        client_addr,
        timestamp,
        method: method.to_string(),
        path: path.to_string(),
        protocol: protocol.to_string(),
        status,
        bytes,
        referrer,
        user_agent,
    })
}

/// Split off the next whitespace-delimited token, returning it with the
/// unconsumed remainder.
fn next_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    }
}

/// Extract the next double-quoted string, honoring backslash escapes.
/// Returns None when no properly terminated quoted field remains.
fn next_quoted(chars: &mut std::str::Chars<'_>) -> Option<String> {
    // Find opening quote
    loop {
        match chars.next() {
            Some('"') => break,
            Some(_) => continue,
            None => return None,
        }
    }
    // Read until closing quote
    let mut val = String::new();
    let mut escaped = false;
    for c in chars.by_ref() {
        if escaped {
            val.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return Some(val);
        } else {
            val.push(c);
        }
    }
    None
}

fn dash_to_empty(s: String) -> String {
    if s == "-" {
        String::new()
    } else {
        s
    }
}
