//! # ccard-cli: Credit Card Management Terminal Front End
//!
//! Binds command-line input to the core validators and the card client, and
//! renders outcomes for a terminal.
//!
//! ## Subcommands
//!
//! - `list`: One page of cards, with next/previous hints
//! - `search`: At most one card by account and/or card number
//! - `show`: One card
//! - `edit`: Partial update of name, status and expiry
//! - `create`: New card
//! - `delete`: Remove a card
//!
//! ## Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Transport, server or configuration failure |
//! | 2 | Invalid input (nothing was changed) |
//! | 3 | Edit conflict or duplicate card |
//! | 4 | No such card |
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from request handling.
//! - Handlers write to an injected writer so output can be asserted in tests.

pub mod cards;
pub mod connect;
pub mod render;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_INVALID: u8 = 2;
pub const EXIT_CONFLICT: u8 = 3;
pub const EXIT_NOT_FOUND: u8 = 4;
