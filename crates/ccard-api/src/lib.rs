//! # ccard-api: Credit Card Backend-for-Frontend
//!
//! Receives browser requests for card operations, re-validates the input,
//! forwards to the upstream card API with the caller's bearer token, and
//! normalises every outcome into one JSON envelope.
//!
//! ## API Surface
//!
//! | Prefix                | Module                       | Purpose              |
//! |-----------------------|------------------------------|----------------------|
//! | `/api/credit-cards*`  | [`routes::credit_cards`]     | Card operations      |
//! | `/openapi.json`       | [`openapi`]                  | OpenAPI document     |
//! | `/health/*`           | this module                  | Probes               |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → Handler
//! ```
//!
//! ## Crate Policy
//!
//! - No card state: every operation is a forward to the upstream.
//! - All errors map to the envelope via [`AppError`].
//! - Invalid input is rejected before anything is forwarded.

pub mod auth;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::AppState;

use axum::Router;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside the tracing layer so
/// that probe traffic does not flood the request log.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::credit_cards::router())
        .merge(openapi::router())
        .layer(middleware::tracing_layer::layer())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
