//! # ccard-core: Foundational Types for the Credit Card Stack
//!
//! Every other crate in the workspace depends on `ccard-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for card fields.** [`CardNumber`], [`AccountId`],
//!    [`EmbossedName`], [`CvvCode`] validate at construction and at
//!    deserialization. A `CardNumber` that exists is 16 digits.
//!
//! 2. **One set of predicates.** The browser-facing client, the forwarding
//!    layer and the upstream stub all call the functions in [`validate`].
//!    Boundaries are inclusive and lengths exact.
//!
//! 3. **Field-keyed errors.** Record-level validation reports every failing
//!    field at once as a [`FieldErrors`] map keyed by the camelCase wire name.
//!
//! 4. **Formatting never fails.** Functions in [`format`] degrade to the raw
//!    input instead of panicking on malformed data.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ccard-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod card;
pub mod error;
pub mod format;
pub mod identity;
pub mod temporal;
pub mod validate;

pub use card::{
    CreateCreditCardRequest, CreditCard, CreditCardListItem, CreditCardListResponse,
    DeleteCreditCardResponse, ListCardsParams, NewCreditCard, SearchCriteria,
    UpdateCreditCardRequest, DELETE_SUCCESS_MESSAGE, MAX_PAGE, PAGE_SIZE,
};
pub use error::{FieldErrors, ValidationError};
pub use identity::{AccountId, ActiveStatus, CardNumber, CvvCode, EmbossedName};
pub use temporal::{ExpirationDate, MonthYear};
pub use validate::Validate;
