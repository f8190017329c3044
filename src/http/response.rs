use bytes::Bytes;

const HTTP_VERSION: &str = "HTTP/1.1";

/// HTTP status codes the server can answer with.
///
/// Every request, including malformed or partial ones, is answered with
/// `200 OK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use hostecho::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
        }
    }
}

/// A complete HTTP response ready to be serialized.
///
/// Headers keep insertion order so the same response always serializes to
/// the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Header name/value pairs in output order
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use hostecho::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-type", "text/html")
///     .body(b"<p>hi</p>".to_vec())
///     .build();
/// assert_eq!(response.header("Content-type"), Some("text/html"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Appends a header. Existing headers with the same name are kept.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// No `Content-Length` is added: the connection is closed after the
    /// body, which delimits it.
    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// `200 OK` HTML page sent with `Connection: close`.
    pub fn html(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-type", "text/html")
            .header("Connection", "close")
            .body(body.into())
            .build()
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Serializes the response into a buffer of `capacity` bytes.
    ///
    /// At most `capacity - 1` bytes are produced; anything past that is cut
    /// off and reported through [`RenderedResponse::truncated`].
    pub fn render(&self, capacity: usize) -> RenderedResponse {
        let mut buf = Vec::new();

        // Status line
        let status_line = format!(
            "{} {} {}\r\n",
            HTTP_VERSION,
            self.status.as_u16(),
            self.status.reason_phrase()
        );
        buf.extend_from_slice(status_line.as_bytes());

        // Headers
        for (k, v) in &self.headers {
            buf.extend_from_slice(k.as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(v.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }

        // Header/body separator
        buf.extend_from_slice(b"\r\n");

        // Body
        buf.extend_from_slice(&self.body);

        let limit = capacity.saturating_sub(1);
        let truncated = buf.len() > limit;
        if truncated {
            tracing::warn!(size = buf.len(), limit, "Response truncated");
            buf.truncate(limit);
        }

        RenderedResponse {
            bytes: Bytes::from(buf),
            truncated,
        }
    }
}

/// The exact bytes written to the client for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    bytes: Bytes,
    truncated: bool,
}

impl RenderedResponse {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn truncated(&self) -> bool {
        self.truncated
    }
}
