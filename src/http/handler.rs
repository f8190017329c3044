use std::time::Duration;

use crate::config::Config;
use crate::http::parser::parse_headers;
use crate::http::reader::RawRequest;
use crate::http::render::{Page, render_header_list, render_page};
use crate::http::response::{RenderedResponse, Response};
use crate::image::ImageTable;

/// Turns a raw request into the rendered landing page.
///
/// Holds only read-only settings, so one instance is shared by every
/// connection. All buffers are created per call.
#[derive(Debug, Clone)]
pub struct Handler {
    images: ImageTable,
    request_capacity: usize,
    read_timeout: Option<Duration>,
    event_logo: String,
    sponsor_logo: String,
    max_headers: usize,
    headers_html_capacity: usize,
    response_capacity: usize,
    escape_header_values: bool,
}

/// What happened while handling one request, for logging.
///
/// `host` is decoded lossily for display only; selection used the raw bytes.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub host: Option<String>,
    pub image_url: String,
    pub header_count: usize,
    pub response: RenderedResponse,
}

impl Handler {
    pub fn new(cfg: &Config) -> Self {
        Self {
            images: ImageTable::from_config(&cfg.logos),
            request_capacity: cfg.limits.request_buffer,
            read_timeout: cfg.server.read_timeout(),
            event_logo: cfg.logos.event_url.clone(),
            sponsor_logo: cfg.logos.sponsor_url.clone(),
            max_headers: cfg.limits.max_headers,
            headers_html_capacity: cfg.limits.headers_html,
            response_capacity: cfg.limits.response_buffer,
            escape_header_values: cfg.render.escape_header_values,
        }
    }

    pub fn request_capacity(&self) -> usize {
        self.request_capacity
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    pub fn handle(&self, raw: &RawRequest) -> Outcome {
        let parsed = parse_headers(raw.as_bytes(), self.max_headers);
        let host = parsed.host();
        let image_url = self.images.select(host);

        let headers_html = render_header_list(
            &parsed.headers,
            self.headers_html_capacity,
            self.escape_header_values,
        );

        let body = render_page(&Page {
            event_logo: &self.event_logo,
            runtime_logo: image_url,
            headers_html: &headers_html,
            sponsor_logo: &self.sponsor_logo,
        });

        let response = Response::html(body).render(self.response_capacity);

        Outcome {
            host: host.map(|h| String::from_utf8_lossy(h).into_owned()),
            image_url: image_url.to_string(),
            header_count: parsed.len(),
            response,
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
