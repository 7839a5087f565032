//! Connection options shared by every subcommand.

use anyhow::{Context, Result};
use ccard_client::{BearerToken, CardApiConfig, CardClient};
use clap::Args;

/// Address of a locally running `ccard-api`.
pub const DEFAULT_BFF_URL: &str = "http://localhost:8080";

/// Where the card API lives and how to authenticate to it.
#[derive(Args, Debug, Clone)]
pub struct ConnectArgs {
    /// Base URL of the card API: the BFF by default, or the upstream service.
    #[arg(long, global = true, env = "CARD_BFF_URL", default_value = DEFAULT_BFF_URL)]
    pub base_url: String,

    /// Bearer token forwarded with every request.
    #[arg(long, global = true, env = "CARD_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds.
    #[arg(
        long,
        global = true,
        env = "CARD_API_TIMEOUT_SECS",
        default_value_t = ccard_client::config::DEFAULT_TIMEOUT_SECS
    )]
    pub timeout_secs: u64,
}

impl ConnectArgs {
    /// Build a client bound to the configured credential.
    pub fn client(&self) -> Result<CardClient> {
        let config = CardApiConfig::new(&self.base_url, self.timeout_secs)
            .with_context(|| format!("invalid --base-url {}", self.base_url))?;
        let client = CardClient::new(config).context("failed to build card API client")?;
        let credential = self
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(BearerToken::new);
        Ok(client.with_credential(credential))
    }
}
