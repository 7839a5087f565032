//! In-memory credit card API stub.
//!
//! Implements the upstream endpoints that `ccard-client` calls, backed by a
//! [`CardStore`]. Used for local development and by the BFF's end-to-end
//! tests. Storage is in-memory with no persistence.

pub mod routes;
pub mod store;

pub use routes::router;
pub use store::{CardStore, InsertError, UpdateError};
