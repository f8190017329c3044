use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::http::handler::Handler;
use crate::http::reader::{RawRequest, read_request};
use crate::http::writer::ResponseWriter;

/// One client connection: a single request, a single response, then close.
pub struct Connection<S> {
    stream: S,
    handler: Arc<Handler>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(RawRequest),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handler: Arc<Handler>) -> Self {
        Self {
            stream,
            handler,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    let raw = read_request(
                        &mut self.stream,
                        self.handler.request_capacity(),
                        self.handler.read_timeout(),
                    )
                    .await;

                    if !raw.is_complete() {
                        tracing::debug!(received = raw.len(), "Request headers incomplete");
                    }

                    self.state = ConnectionState::Processing(raw);
                }

                ConnectionState::Processing(raw) => {
                    let outcome = self.handler.handle(raw);

                    tracing::info!(
                        host = outcome.host.as_deref().unwrap_or(""),
                        image = %outcome.image_url,
                        headers = outcome.header_count,
                        "Request handled"
                    );

                    let writer = ResponseWriter::new(outcome.response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    tracing::info!(bytes = writer.written(), "Reply sent to client");

                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        // The reply is already out; a failed close does not fail the request.
        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!(error = %e, "Shutdown after reply failed");
        }

        Ok(())
    }
}
