use bytes::Bytes;

use crate::http::request::{HeaderLine, ParsedRequest};

const HEADERS_END: &[u8] = b"\r\n\r\n";

/// Splits a raw request into its header lines.
///
/// The first line (method, path, version) is skipped. Every later non-empty
/// line containing a `:` becomes a [`HeaderLine`]; lines without one are
/// ignored. Only the header section is looked at: anything after the first
/// blank line is body and never parsed. Input that stops mid-headers is
/// parsed as far as it goes.
///
/// At most `max_headers` lines are kept; the rest are counted in
/// [`ParsedRequest::dropped`].
pub fn parse_headers(buf: &[u8], max_headers: usize) -> ParsedRequest {
    let section = match find_headers_end(buf) {
        Some(end) => &buf[..end],
        None => buf,
    };

    let mut parsed = ParsedRequest::default();

    for line in lines(section).skip(1) {
        if line.is_empty() {
            continue;
        }

        let Some(header) = split_header(line) else {
            tracing::debug!(len = line.len(), "Skipping header line without ':'");
            continue;
        };

        if parsed.headers.len() >= max_headers {
            parsed.dropped += 1;
            continue;
        }

        parsed.headers.push(header);
    }

    if parsed.dropped > 0 {
        tracing::debug!(
            kept = parsed.headers.len(),
            dropped = parsed.dropped,
            "Header capacity reached"
        );
    }

    parsed
}

/// Lines split on `\n`, with a trailing `\r` removed. Bytes are kept as
/// received; nothing is decoded.
fn lines(buf: &[u8]) -> impl Iterator<Item = &[u8]> {
    buf.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

/// Splits once at the first `:`. A single space after the colon is
/// consumed; if it is missing the value starts right after the colon.
fn split_header(line: &[u8]) -> Option<HeaderLine> {
    let colon = line.iter().position(|&b| b == b':')?;
    let (name, rest) = (&line[..colon], &line[colon + 1..]);
    let value = rest.strip_prefix(b" ").unwrap_or(rest);
    Some(HeaderLine::new(
        Bytes::copy_from_slice(name),
        Bytes::copy_from_slice(value),
    ))
}

/// Offset of the `\r\n\r\n` terminator, if present.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADERS_END.len())
        .position(|w| w == HEADERS_END)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = parse_headers(req, 16);

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.header("Host"), Some(&b"example.com"[..]));
    }

    #[test]
    fn split_keeps_later_colons_in_value() {
        let header = split_header(b"Referer: http://a.example:8080/x").unwrap();
        assert_eq!(header.name, "Referer");
        assert_eq!(header.value, "http://a.example:8080/x");
    }
}
