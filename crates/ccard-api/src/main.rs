//! # ccard-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the credit card BFF.
//! Binds to configurable port (default 8080).

use ccard_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing. `LOG_FORMAT=json` switches to JSON lines.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {e}");
        e
    })?;
    tracing::info!(
        upstream = %config.upstream.base_url,
        timeout_secs = config.upstream.timeout_secs,
        "card API upstream configured"
    );

    let port = config.port;
    let state = AppState::new(config).map_err(|e| {
        tracing::error!("Failed to create card API client: {e}");
        e
    })?;

    let app = ccard_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("ccard API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
