use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{Instrument, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::handler::Handler;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = bind(cfg)?;
    info!("Listening on {}", listener.local_addr()?);

    let handler = Arc::new(Handler::new(cfg));
    serve(listener, handler).await
}

/// Creates the listening socket with `SO_REUSEADDR` and the configured backlog.
pub fn bind(cfg: &Config) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = cfg
        .server
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", cfg.server.listen_addr))?;

    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4(),
        SocketAddr::V6(_) => TcpSocket::new_v6(),
    }
    .context("Failed to create socket")?;

    socket.set_reuseaddr(true)?;
    socket
        .bind(addr)
        .with_context(|| format!("Failed to bind {}", addr))?;

    socket
        .listen(cfg.server.backlog)
        .context("Failed to listen")
}

/// Accepts connections until the task is dropped.
///
/// Accept failures only affect the one connection; the loop keeps going.
pub async fn serve(listener: TcpListener, handler: Arc<Handler>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!("Accept failed: {}", e);
                continue;
            }
        };
        tracing::debug!("Accepted connection from {}", peer);

        let handler = Arc::clone(&handler);
        tokio::spawn(
            async move {
                let mut conn = Connection::new(socket, handler);
                if let Err(e) = conn.run().await {
                    tracing::error!("Connection error from {}: {}", peer, e);
                }
            }
            .instrument(tracing::info_span!("conn", %peer)),
        );
    }
}
