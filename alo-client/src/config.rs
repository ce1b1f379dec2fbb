//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

/// Default booking poll interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
/// Shortest poll interval accepted; a zero period would spin
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);
/// Default customer type-ahead debounce
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(800);
/// Default load-more step
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Client configuration for the restaurant service
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ALO_API_URL | http://localhost:5000 | Service base URL |
/// | ALO_API_TOKEN | - | Bearer token |
/// | ALO_REQUEST_TIMEOUT_SECS | 30 | Request timeout (seconds) |
/// | ALO_POLL_INTERVAL_SECS | 10 | Booking poll interval (seconds) |
/// | ALO_PAGE_SIZE | 10 | Load-more step |
/// | ALO_SEARCH_DEBOUNCE_MS | 800 | Customer search debounce (ms) |
/// | ALO_PREFERENCE_DIR | .alo | Preference cache directory |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Bearer token of the signed-in staff member
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Booking poll interval
    pub poll_interval: Duration,

    /// Rows added by each load-more
    pub page_size: u32,

    /// Customer type-ahead debounce
    pub search_debounce: Duration,

    /// Where the preference cache keeps its files
    pub preference_dir: PathBuf,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            poll_interval: DEFAULT_POLL_INTERVAL,
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            preference_dir: PathBuf::from(".alo"),
        }
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("ALO_API_URL").unwrap_or_else(|_| "http://localhost:5000".into()),
        );
        config.token = std::env::var("ALO_API_TOKEN").ok().filter(|t| !t.is_empty());
        if let Some(timeout) = env_parse("ALO_REQUEST_TIMEOUT_SECS") {
            config.timeout = timeout;
        }
        if let Some(secs) = env_parse("ALO_POLL_INTERVAL_SECS") {
            config = config.with_poll_interval(Duration::from_secs(secs));
        }
        if let Some(page_size) = env_parse("ALO_PAGE_SIZE") {
            config.page_size = page_size;
        }
        if let Some(ms) = env_parse("ALO_SEARCH_DEBOUNCE_MS") {
            config.search_debounce = Duration::from_millis(ms);
        }
        if let Ok(dir) = std::env::var("ALO_PREFERENCE_DIR") {
            config.preference_dir = PathBuf::from(dir);
        }
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the poll interval; values below one second are raised to it
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }

    pub fn with_preference_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.preference_dir = dir.into();
        self
    }

    /// Create a network HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::from_config(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = ClientConfig::new("http://pos.local:5000")
            .with_token("staff-token")
            .with_timeout(5)
            .with_poll_interval(Duration::from_secs(3))
            .with_page_size(0)
            .with_preference_dir("/tmp/alo");

        assert_eq!(config.base_url, "http://pos.local:5000");
        assert_eq!(config.token.as_deref(), Some("staff-token"));
        assert_eq!(config.timeout, 5);
        assert_eq!(config.poll_interval, Duration::from_secs(3));
        assert_eq!(config.page_size, 1);
        assert_eq!(config.preference_dir, PathBuf::from("/tmp/alo"));
        assert_eq!(config.search_debounce, DEFAULT_SEARCH_DEBOUNCE);
    }

    #[test]
    fn zero_poll_interval_is_raised() {
        let config = ClientConfig::default().with_poll_interval(Duration::ZERO);
        assert_eq!(config.poll_interval, MIN_POLL_INTERVAL);
    }
}
