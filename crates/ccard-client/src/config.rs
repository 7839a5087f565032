//! Card API client configuration.
//!
//! One base URL and a request timeout. The bearer credential is not part of
//! the configuration: it belongs to the caller and is attached per client
//! instance with [`crate::CardClient::with_credential`].

use url::Url;

/// Default upstream base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8084";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the card API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardApiConfig {
    /// Base URL of the card API. Always ends with `/`.
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl CardApiConfig {
    /// Build a configuration from a base URL string.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("base_url", base_url)?,
            timeout_secs,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CARD_API_URL` (default: `http://localhost:8084`)
    /// - `CARD_API_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("CARD_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            base_url: parse_base_url("CARD_API_URL", &raw)?,
            timeout_secs: std::env::var("CARD_API_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Configuration pointing at a server on localhost (for testing).
    pub fn local(port: u16) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("localhost", &format!("http://127.0.0.1:{port}"))?,
            timeout_secs: 5,
        })
    }
}

/// Parse a base URL, appending a trailing `/` so relative paths join below it.
fn parse_base_url(source: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(source.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            source.to_string(),
            "URL cannot be a base".to_string(),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
