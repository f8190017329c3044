use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::RenderedResponse;

pub struct ResponseWriter {
    response: RenderedResponse,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: RenderedResponse) -> Self {
        Self {
            response,
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub async fn write_to_stream<S>(&mut self, stream: &mut S) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        let buffer = self.response.as_bytes();

        while self.written < buffer.len() {
            let n = stream.write(&buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
