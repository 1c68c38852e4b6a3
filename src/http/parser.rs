use std::collections::HashMap;

use crate::http::request::{Method, Request};

/// Parses a raw request buffer into a [`Request`].
///
/// Parsing is total: malformed input degrades to a `BAD` method, an empty
/// path, or missing headers, never an error. The buffer is treated as
/// null-terminated — everything from the first `0x00` byte onward is ignored —
/// and non-UTF-8 bytes are replaced rather than rejected.
pub fn parse(raw: &[u8]) -> Request {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    let raw = &raw[..end];
    let text = String::from_utf8_lossy(raw);

    let (method, path, version) = parse_request_line(&text);

    // The header pass runs independently of the request line, so an aborted
    // request line still yields whatever headers the buffer carries.
    let headers = parse_headers(&text);

    Request {
        method,
        path,
        version,
        headers,
        raw: raw.to_vec(),
    }
}

/// Tokenizes the request line: `GET / HTTP/1.1`.
///
/// Whitespace runs collapse to single boundaries and tokens beyond the third
/// are ignored. A buffer that begins with whitespace yields an unset request
/// line (method `BAD`, empty path and version).
fn parse_request_line(text: &str) -> (Method, String, String) {
    if text.starts_with(|c: char| c.is_ascii_whitespace()) {
        return (Method::BAD, String::new(), String::new());
    }

    let mut tokens = text.split_ascii_whitespace();

    let method = match tokens.next() {
        Some(token) => Method::from_token(token),
        None => Method::BAD,
    };
    let path = tokens.next().unwrap_or_default().to_string();
    let version = tokens.next().unwrap_or_default().to_string();

    (method, path, version)
}

/// Parses the header block.
///
/// Lines are terminated by CR with the following LF consumed and discarded;
/// a bare LF is not a terminator. The first line is always discarded as the
/// request line. Empty lines and lines without a colon are skipped. Values
/// are trimmed of spaces and tabs; names are stored as received. Duplicate
/// names last-write-wins.
fn parse_headers(text: &str) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    let mut rest = text;

    // Request line.
    if next_line(&mut rest).is_none() {
        return headers;
    }
    skip_one(&mut rest);

    while let Some(line) = next_line(&mut rest) {
        skip_one(&mut rest);

        if line.is_empty() {
            continue;
        }

        let Some((name, value)) = line.split_once(':') else {
            continue;
        };

        headers.insert(
            name.to_string(),
            value.trim_matches([' ', '\t']).to_string(),
        );
    }

    headers
}

/// Reads up to the next CR (consuming it) or to the end of input.
/// Returns `None` once the input is exhausted.
fn next_line<'a>(rest: &mut &'a str) -> Option<&'a str> {
    if rest.is_empty() {
        return None;
    }

    match rest.find('\r') {
        Some(i) => {
            let line = &rest[..i];
            *rest = &rest[i + 1..];
            Some(line)
        }
        None => {
            let line = *rest;
            *rest = "";
            Some(line)
        }
    }
}

/// Discards a single character, the LF of a CRLF pair.
fn skip_one(rest: &mut &str) {
    let mut chars = rest.chars();
    if chars.next().is_some() {
        *rest = chars.as_str();
    }
}
