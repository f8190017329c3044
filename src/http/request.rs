use bytes::Bytes;

/// Host values of this many bytes or more are rejected rather than truncated.
pub const HOST_CAPACITY: usize = 256;

/// One `Name: Value` line from the request header section.
///
/// The name is the text before the first `:`, the value the text after the
/// single space that follows it. Both are the bytes as received: not
/// decoded, trimmed, case-folded or escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
    pub name: Bytes,
    pub value: Bytes,
}

impl HeaderLine {
    pub fn new(name: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Header lines of a request in the order they were received.
///
/// The request line is not kept. Duplicate names are not merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRequest {
    pub headers: Vec<HeaderLine>,
    /// Number of header lines dropped because the header capacity was reached
    pub dropped: usize,
}

impl ParsedRequest {
    pub fn new(headers: Vec<HeaderLine>) -> Self {
        Self {
            headers,
            dropped: 0,
        }
    }

    /// Value of the first header named exactly `name` (case-sensitive).
    pub fn header(&self, name: &str) -> Option<&[u8]> {
        self.headers
            .iter()
            .find(|h| h.name == name.as_bytes())
            .map(|h| h.value.as_ref())
    }

    /// Resolves the `Host` header.
    ///
    /// Only the first `Host` line is considered. Returns `None` when there is
    /// none, or when its raw value does not fit in [`HOST_CAPACITY`].
    pub fn host(&self) -> Option<&[u8]> {
        let host = self.header("Host")?;

        if host.len() >= HOST_CAPACITY {
            tracing::warn!(len = host.len(), "Host header too long, ignoring");
            return None;
        }

        Some(host)
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderLine> {
        self.headers.iter()
    }
}
