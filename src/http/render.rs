//! HTML rendering of the landing page.
//!
//! Header names and values are client-controlled. They are inserted as-is
//! unless escaping is switched on, in which case `<`, `>`, `&` and `"` are
//! replaced by entities. Either way the output is bytes: header values
//! are echoed exactly as received, whatever their encoding.

use crate::http::request::HeaderLine;

/// Dynamic values substituted into the page template.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    pub event_logo: &'a str,
    pub runtime_logo: &'a str,
    pub headers_html: &'a [u8],
    pub sponsor_logo: &'a str,
}

/// Appends `bytes` to `out` with `<`, `>`, `&` and `"` replaced by entities.
pub fn escape_html_into(out: &mut Vec<u8>, bytes: &[u8]) {
    for &b in bytes {
        match b {
            b'<' => out.extend_from_slice(b"&lt;"),
            b'>' => out.extend_from_slice(b"&gt;"),
            b'&' => out.extend_from_slice(b"&amp;"),
            b'"' => out.extend_from_slice(b"&quot;"),
            _ => out.push(b),
        }
    }
}

fn push_field(out: &mut Vec<u8>, bytes: &[u8], escape: bool) {
    if escape {
        escape_html_into(out, bytes);
    } else {
        out.extend_from_slice(bytes);
    }
}

/// Renders one list item.
pub fn render_header_item(header: &HeaderLine, escape: bool) -> Vec<u8> {
    let mut item = Vec::with_capacity(header.name.len() + header.value.len() + 30);
    item.extend_from_slice(b"<li><strong>");
    push_field(&mut item, &header.name, escape);
    item.extend_from_slice(b":</strong> ");
    push_field(&mut item, &header.value, escape);
    item.extend_from_slice(b"</li>");
    item
}

/// Renders headers as `<li>` items in order, into a buffer of `capacity`
/// bytes (at most `capacity - 1` used).
///
/// Rendering stops at the first item that does not fit; items are never
/// cut in half.
pub fn render_header_list(headers: &[HeaderLine], capacity: usize, escape: bool) -> Vec<u8> {
    let limit = capacity.saturating_sub(1);
    let mut html = Vec::new();

    for (i, header) in headers.iter().enumerate() {
        let item = render_header_item(header, escape);
        if html.len() + item.len() > limit {
            tracing::debug!(
                rendered = i,
                total = headers.len(),
                "Header list capacity reached"
            );
            break;
        }
        html.extend_from_slice(&item);
    }

    html
}

/// Fills the page template.
pub fn render_page(page: &Page<'_>) -> Vec<u8> {
    let mut out = format!(
        concat!(
            "<!DOCTYPE html>",
            "<html lang=\"en\">",
            "<head><meta charset=\"UTF-8\"><meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">",
            "<title>Serverless Demo</title>",
            "<style>",
            "body {{ font-family: sans-serif; margin: 20px; }}",
            "h1, h2 {{ margin-bottom: 10px; }}",
            ".logo-row {{ display: flex; flex-wrap: wrap; gap: 20px; align-items: center; }}",
            ".logo-row img {{ max-width: 100%; height: auto; max-height: 120px; }}",
            ".header-list {{ list-style: none; padding: 0; }}",
            ".header-list li {{ margin: 5px 0; padding: 8px; background: #f2f2f2; border-radius: 5px; }}",
            "</style></head><body>",
            "<h1>Hello from Knative!</h1>",
            "<div class=\"logo-row\">",
            "<img src=\"{event}\" alt=\"Event Logo\" />",
            "<img src=\"{runtime}\" alt=\"RuntimeClass\" />",
            "</div>",
            "<h2>Request Headers</h2>",
            "<ul class=\"header-list\">"
        ),
        event = page.event_logo,
        runtime = page.runtime_logo,
    )
    .into_bytes();

    out.extend_from_slice(page.headers_html);

    let tail = format!(
        concat!(
            "</ul>",
            "<h2>Brought to you by</h2>",
            "<img src=\"{sponsor}\" alt=\"Nubis Logo\" style=\"max-width: 200px;\">",
            "</body></html>"
        ),
        sponsor = page.sponsor_logo,
    );
    out.extend_from_slice(tail.as_bytes());

    out
}
