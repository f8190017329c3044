use bytes::{Bytes, BytesMut};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::{Instant, timeout_at};

use crate::http::parser::find_headers_end;

/// Bytes received from a client, up to the end of its headers.
///
/// Never longer than the reader's capacity minus one. May stop short of the
/// header terminator if the peer closed, the buffer filled up, or the read
/// deadline passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRequest {
    bytes: Bytes,
}

impl RawRequest {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the `\r\n\r\n` terminator was received.
    pub fn is_complete(&self) -> bool {
        find_headers_end(&self.bytes).is_some()
    }
}

/// Accumulates request bytes from `stream`.
///
/// Stops once the header terminator has been seen, the peer closes, a read
/// fails, `capacity - 1` bytes are buffered, or `deadline` elapses. None of
/// these are errors: whatever arrived is returned for parsing.
pub async fn read_request<S>(
    stream: &mut S,
    capacity: usize,
    deadline: Option<Duration>,
) -> RawRequest
where
    S: AsyncRead + Unpin,
{
    let limit = capacity.saturating_sub(1);
    let deadline = deadline.map(|d| Instant::now() + d);
    let mut buffer = BytesMut::with_capacity(limit);
    let mut temp = [0u8; 1024];

    while buffer.len() < limit {
        let want = temp.len().min(limit - buffer.len());
        let read = stream.read(&mut temp[..want]);

        let result = match deadline {
            Some(at) => match timeout_at(at, read).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(received = buffer.len(), "Read deadline elapsed");
                    break;
                }
            },
            None => read.await,
        };

        let n = match result {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                tracing::debug!(error = %e, received = buffer.len(), "Read failed");
                break;
            }
        };

        buffer.extend_from_slice(&temp[..n]);

        if find_headers_end(&buffer).is_some() {
            break;
        }
    }

    RawRequest::new(buffer.freeze())
}
