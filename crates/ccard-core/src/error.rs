//! # Error Types
//!
//! Validation errors for card fields and card requests, built with
//! `thiserror`.
//!
//! ## Design
//!
//! - Single-field variants carry the human-readable message shown next to
//!   the form field. Card numbers and CVV codes are never echoed back in a
//!   message.
//! - Record-level validation collects every failing field into
//!   [`FieldErrors`] so that a form can highlight all of them in one round
//!   trip.
//! - Request-shape failures (no search criterion, path/body mismatch) are not
//!   tied to a single field and have their own variants.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire names of the card fields, used as keys in [`FieldErrors`].
pub mod field {
    /// `cardNumber`
    pub const CARD_NUMBER: &str = "cardNumber";
    /// `accountId`
    pub const ACCOUNT_ID: &str = "accountId";
    /// `embossedName`
    pub const EMBOSSED_NAME: &str = "embossedName";
    /// `cvvCode`
    pub const CVV_CODE: &str = "cvvCode";
    /// `activeStatus`
    pub const ACTIVE_STATUS: &str = "activeStatus";
    /// `expirationMonth`
    pub const EXPIRATION_MONTH: &str = "expirationMonth";
    /// `expirationYear`
    pub const EXPIRATION_YEAR: &str = "expirationYear";
    /// `expirationDate`
    pub const EXPIRATION_DATE: &str = "expirationDate";
    /// `page`
    pub const PAGE: &str = "page";
}

/// Validation failure for a card field or a card request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Card number is not exactly 16 decimal digits.
    #[error("Card number must be exactly 16 digits")]
    InvalidCardNumber,

    /// Account ID is not exactly 11 decimal digits.
    #[error("Account ID must be exactly 11 digits")]
    InvalidAccountId,

    /// Embossed name is empty.
    #[error("Embossed name is required")]
    EmptyEmbossedName,

    /// Embossed name exceeds 50 characters.
    #[error("Embossed name must not exceed 50 characters")]
    EmbossedNameTooLong,

    /// Embossed name contains something other than letters and whitespace.
    #[error("Embossed name must contain only alphabets and spaces")]
    InvalidEmbossedName,

    /// CVV code is not exactly 3 decimal digits.
    #[error("CVV code must be exactly 3 digits")]
    InvalidCvvCode,

    /// Active status is not `Y` or `N`.
    #[error("Active status must be Y or N")]
    InvalidActiveStatus,

    /// Expiration month outside 1..=12.
    #[error("Expiration month must be between 1 and 12")]
    InvalidExpirationMonth,

    /// Expiration year outside 1950..=2099.
    #[error("Expiration year must be between 1950 and 2099")]
    InvalidExpirationYear,

    /// Expiration date is not a real `YYYY-MM-DD` calendar date.
    #[error("Expiration date must be a valid YYYY-MM-DD date")]
    InvalidExpirationDate,

    /// Expiration date parses but its year is outside 1950..=2099.
    #[error("Expiration date year must be between 1950 and 2099")]
    ExpirationDateOutOfRange,

    /// Page number below 1 or beyond what a response can report.
    #[error("Page number must be between 1 and 4294967295")]
    InvalidPage,

    /// A search was requested without any criterion.
    #[error("At least one search criterion (accountId or cardNumber) must be provided")]
    MissingSearchCriterion,

    /// The card number in an update body differs from the one in the path.
    #[error("Card number in path must match card number in request body")]
    CardNumberMismatch,

    /// One or more fields failed validation.
    #[error("validation failed: {0}")]
    Fields(FieldErrors),
}

impl ValidationError {
    /// The wire name of the field this error belongs to, if it belongs to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidCardNumber => Some(field::CARD_NUMBER),
            Self::InvalidAccountId => Some(field::ACCOUNT_ID),
            Self::EmptyEmbossedName | Self::EmbossedNameTooLong | Self::InvalidEmbossedName => {
                Some(field::EMBOSSED_NAME)
            }
            Self::InvalidCvvCode => Some(field::CVV_CODE),
            Self::InvalidActiveStatus => Some(field::ACTIVE_STATUS),
            Self::InvalidExpirationMonth => Some(field::EXPIRATION_MONTH),
            Self::InvalidExpirationYear => Some(field::EXPIRATION_YEAR),
            Self::InvalidExpirationDate | Self::ExpirationDateOutOfRange => {
                Some(field::EXPIRATION_DATE)
            }
            Self::InvalidPage => Some(field::PAGE),
            Self::MissingSearchCriterion | Self::CardNumberMismatch | Self::Fields(_) => None,
        }
    }

    /// Express this error as a field map.
    ///
    /// Returns `None` for request-shape errors that have no field.
    pub fn into_field_errors(self) -> Option<FieldErrors> {
        match self {
            Self::Fields(fields) => Some(fields),
            other => other.field().map(|name| {
                let mut fields = FieldErrors::new();
                fields.insert(name, other.to_string());
                fields
            }),
        }
    }
}

/// Ordered map from field wire name to validation message.
///
/// Serializes as a plain JSON object: `{"cardNumber": "Card number must be ..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Create an empty map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record a message for a field. The first message recorded for a field wins.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Record the error of a field-level check, if it failed.
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(err) = result {
            if let Some(name) = err.field() {
                self.insert(name, err.to_string());
            }
        }
    }

    /// Message recorded for a field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when empty, otherwise [`ValidationError::Fields`].
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Fields(self))
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}
