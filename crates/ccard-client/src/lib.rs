//! # ccard-client -- Typed Rust client for the credit card API
//!
//! The data service used by every front end. It issues list, search, get,
//! update, create and delete requests against a card API base URL and maps
//! HTTP status codes to typed outcomes:
//!
//! | Status | Outcome |
//! |--------|---------|
//! | 2xx    | `Ok(value)` |
//! | 404 on get/search | `Ok(None)` |
//! | 400    | [`CardClientError::BadRequest`] with the field map, if any |
//! | 401 / 403 | [`CardClientError::Unauthorized`] / [`CardClientError::Forbidden`] |
//! | 404 otherwise | [`CardClientError::NotFound`] |
//! | 409    | [`CardClientError::Conflict`] |
//! | other  | [`CardClientError::ApiError`] |
//!
//! The same client talks to the forwarding service (from a front end) and to
//! the upstream backend (from the forwarding service); both expose the same
//! paths.
//!
//! ## Credentials
//!
//! The bearer token is explicit. [`CardClient::new`] builds a client with no
//! credential; [`CardClient::with_credential`] returns a copy bound to the
//! caller's token.

pub mod cards;
pub mod config;
pub mod credential;
pub mod error;

pub use cards::CardClient;
pub use config::{CardApiConfig, ConfigError};
pub use credential::BearerToken;
pub use error::CardClientError;
