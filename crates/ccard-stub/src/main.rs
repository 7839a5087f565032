//! Card API stub server.
//!
//! Listens on `CARD_STUB_PORT` (default 8084) and starts with demo data
//! unless `CARD_STUB_EMPTY` is set.

use std::net::SocketAddr;

use ccard_stub::CardStore;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 8084;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("CARD_STUB_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let store = if std::env::var_os("CARD_STUB_EMPTY").is_some() {
        CardStore::new()
    } else {
        CardStore::with_demo_data()
    };
    tracing::info!(cards = store.len(), "card store ready");

    let app = ccard_stub::router(store);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("ccard-stub listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
