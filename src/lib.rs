//! hostecho - Host-aware landing page server
//!
//! Answers every HTTP request with an HTML page that echoes the request
//! headers and shows a logo chosen from the `Host` header.

pub mod config;
pub mod http;
pub mod image;
pub mod server;
