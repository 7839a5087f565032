//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. The service keeps no card data of its own:
//! every request is forwarded to the upstream card API through one
//! [`CardClient`], re-bound to the caller's credential per request.

use std::sync::Arc;

use ccard_client::{BearerToken, CardApiConfig, CardClient, CardClientError, ConfigError};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Upstream card API.
    pub upstream: CardApiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 8080)
    /// - `CARD_API_URL`, `CARD_API_TIMEOUT_SECS` (see [`CardApiConfig::from_env`])
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Ok(Self {
            port,
            upstream: CardApiConfig::from_env()?,
        })
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    client: CardClient,
}

impl AppState {
    /// Build state, constructing the upstream client from configuration.
    pub fn new(config: AppConfig) -> Result<Self, CardClientError> {
        let client = CardClient::new(config.upstream.clone())?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// The upstream client bound to a caller's credential.
    pub fn upstream(&self, credential: Option<BearerToken>) -> CardClient {
        self.client.with_credential(credential)
    }
}
