use crate::config::LogoConfig;

/// A single hostname pattern and the logo it selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRule {
    /// Case-sensitive substring looked for anywhere in the host
    pub pattern: String,
    /// Logo URL returned when the pattern matches
    pub url: String,
}

impl ImageRule {
    pub fn new(pattern: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            url: url.into(),
        }
    }

    /// Byte-wise substring test. An empty pattern never matches.
    pub fn matches(&self, host: &[u8]) -> bool {
        let pattern = self.pattern.as_bytes();
        !pattern.is_empty() && host.windows(pattern.len()).any(|w| w == pattern)
    }
}

/// Ordered rule list plus a default URL.
///
/// Built once at startup and only read afterwards, so it can be shared
/// between connections without synchronization.
#[derive(Debug, Clone)]
pub struct ImageTable {
    rules: Vec<ImageRule>,
    default_url: String,
}

impl ImageTable {
    pub fn new(rules: Vec<ImageRule>, default_url: impl Into<String>) -> Self {
        Self {
            rules,
            default_url: default_url.into(),
        }
    }

    pub fn from_config(config: &LogoConfig) -> Self {
        let rules = config
            .rules
            .iter()
            .map(|r| ImageRule::new(r.pattern.as_str(), r.url.as_str()))
            .collect();

        Self::new(rules, config.default_url.as_str())
    }

    /// Returns the URL of the first rule whose pattern occurs in `host`,
    /// or the default URL when nothing matches or there is no host.
    ///
    /// The host is compared as raw bytes, so it need not be valid UTF-8.
    pub fn select<H>(&self, host: Option<&H>) -> &str
    where
        H: AsRef<[u8]> + ?Sized,
    {
        let Some(host) = host.map(<H as AsRef<[u8]>>::as_ref) else {
            return &self.default_url;
        };

        self.rules
            .iter()
            .find(|rule| rule.matches(host))
            .map(|rule| rule.url.as_str())
            .unwrap_or(&self.default_url)
    }

    pub fn rules(&self) -> &[ImageRule] {
        &self.rules
    }

    pub fn default_url(&self) -> &str {
        &self.default_url
    }
}

impl Default for ImageTable {
    fn default() -> Self {
        Self::from_config(&LogoConfig::default())
    }
}
