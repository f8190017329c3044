//! Runtime configuration
//!
//! Defaults reproduce the stock behavior: port 8080 on all interfaces,
//! 4 KiB request buffer, the hypervisor logo table. A YAML file named by
//! `HOSTECHO_CONFIG` can override any section, and `LISTEN` overrides the
//! listen address last.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

const LOGO_BASE: &str = "https://s3.nbfc.io/hypervisor-logos";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub limits: LimitsConfig,
    pub logos: LogoConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub backlog: u32,
    /// Upper bound on the time spent waiting for request headers.
    /// `None` waits indefinitely.
    pub read_timeout_ms: Option<u64>,
}

/// Buffer capacities. A capacity of `n` holds at most `n - 1` bytes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub request_buffer: usize,
    pub max_headers: usize,
    pub headers_html: usize,
    pub response_buffer: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogoConfig {
    pub event_url: String,
    pub sponsor_url: String,
    pub default_url: String,
    /// Tested in order; the first pattern found in the host wins.
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleConfig {
    pub pattern: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub escape_header_values: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            backlog: 5,
            read_timeout_ms: None,
        }
    }
}

impl ServerConfig {
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            request_buffer: 4096,
            max_headers: 100,
            headers_html: 8192,
            response_buffer: 16384,
        }
    }
}

impl Default for LogoConfig {
    fn default() -> Self {
        let rule = |pattern: &str, file: &str| RuleConfig {
            pattern: pattern.to_string(),
            url: format!("{}/{}", LOGO_BASE, file),
        };

        Self {
            event_url: format!("{}/athk8s.png", LOGO_BASE),
            sponsor_url: format!("{}/nubis-logo-scaled.png", LOGO_BASE),
            default_url: format!("{}/container.png", LOGO_BASE),
            rules: vec![
                rule("hellofc", "firecracker.png"),
                rule("helloqemu", "qemu.png"),
                rule("helloclh", "clh.png"),
                rule("hellors", "dragonball.png"),
                rule("hellouruncfc", "uruncfc.png"),
                rule("hellouruncqemu", "uruncqemu.png"),
            ],
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `lookup` in place of the process environment.
    pub fn load_from<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup("HOSTECHO_CONFIG") {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(addr) = lookup("LISTEN") {
            cfg.server.listen_addr = addr;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("Failed to parse YAML configuration")
    }

    pub fn validate(&self) -> Result<()> {
        self.server
            .listen_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid listen address: {}", self.server.listen_addr))?;

        if self.server.backlog == 0 {
            anyhow::bail!("server.backlog must be at least 1");
        }

        let limits = [
            ("request_buffer", self.limits.request_buffer),
            ("headers_html", self.limits.headers_html),
            ("response_buffer", self.limits.response_buffer),
        ];
        for (name, capacity) in limits {
            if capacity < 2 {
                anyhow::bail!("limits.{} must be at least 2, got {}", name, capacity);
            }
        }

        check_url("logos.event_url", &self.logos.event_url)?;
        check_url("logos.sponsor_url", &self.logos.sponsor_url)?;
        check_url("logos.default_url", &self.logos.default_url)?;

        for (i, rule) in self.logos.rules.iter().enumerate() {
            if rule.pattern.is_empty() {
                anyhow::bail!("logos.rules[{}] has an empty pattern", i);
            }
            check_url(&format!("logos.rules[{}].url", i), &rule.url)?;
        }

        Ok(())
    }
}

fn check_url(field: &str, value: &str) -> Result<()> {
    url::Url::parse(value).with_context(|| format!("{} is not a valid URL: {}", field, value))?;
    Ok(())
}
