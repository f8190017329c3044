//! HTTP request handling.
//!
//! Each connection carries exactly one request and one response:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Buffer bytes until \r\n\r\n, EOF or capacity
//!        └──────┬──────┘
//!               │
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Parse headers, pick logo, render page
//!        └──────┬───────────┘
//!               │
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send the rendered bytes
//!        └──────┬───────────┘
//!               │
//!               ▼
//!             Closed
//! ```
//!
//! - **`reader`**: bounded accumulation of the raw request
//! - **`parser`**: splits the header section into ordered header lines
//! - **`request`**: header line types and `Host` resolution
//! - **`render`**: header list fragment and page template
//! - **`response`**: status, headers, bounded serialization
//! - **`handler`**: the per-request pipeline
//! - **`writer`**: writes the rendered bytes
//! - **`connection`**: the state machine above
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hostecho::http::{connection::Connection, handler::Handler};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let handler = Arc::new(Handler::default());
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let handler = handler.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, handler);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod handler;
pub mod parser;
pub mod reader;
pub mod render;
pub mod request;
pub mod response;
pub mod writer;
