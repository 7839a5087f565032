//! # Field Validators
//!
//! Pure predicates over a single field value. The same functions back the
//! newtype constructors in [`crate::identity`], the record-level checks in
//! [`crate::card`], the forwarding layer and the upstream stub, so a value is
//! accepted or rejected identically everywhere.
//!
//! | Field            | Rule                                         |
//! |------------------|----------------------------------------------|
//! | card number      | `^\d{16}$`                                   |
//! | account id       | `^\d{11}$`                                   |
//! | embossed name    | 1..=50 chars, `^[A-Za-z\s]+$`                |
//! | CVV code         | `^\d{3}$`                                    |
//! | active status    | `Y` or `N`                                   |
//! | expiration month | 1..=12                                       |
//! | expiration year  | 1950..=2099                                  |
//!
//! Digits are ASCII digits only. Separators are not tolerated here; see
//! [`crate::format::format_card_number`] for display grouping.

use crate::error::ValidationError;
use crate::temporal::ExpirationDate;

/// Length of a card number.
pub const CARD_NUMBER_LENGTH: usize = 16;
/// Length of an account id.
pub const ACCOUNT_ID_LENGTH: usize = 11;
/// Maximum length of an embossed name.
pub const EMBOSSED_NAME_MAX_LENGTH: usize = 50;
/// Length of a CVV code.
pub const CVV_CODE_LENGTH: usize = 3;
/// Smallest valid expiration month.
pub const MIN_EXPIRATION_MONTH: i64 = 1;
/// Largest valid expiration month.
pub const MAX_EXPIRATION_MONTH: i64 = 12;
/// Smallest valid expiration year.
pub const MIN_EXPIRATION_YEAR: i64 = 1950;
/// Largest valid expiration year.
pub const MAX_EXPIRATION_YEAR: i64 = 2099;

/// Types that can check their business rules beyond what deserialization checks.
pub trait Validate {
    /// Validate business rules.
    fn validate(&self) -> Result<(), ValidationError>;
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// `true` iff `s` is exactly 16 ASCII digits.
pub fn validate_card_number(s: &str) -> bool {
    is_digits(s, CARD_NUMBER_LENGTH)
}

/// `true` iff `s` is exactly 11 ASCII digits.
pub fn validate_account_id(s: &str) -> bool {
    is_digits(s, ACCOUNT_ID_LENGTH)
}

/// `true` iff `s` is non-empty, at most 50 characters, and only letters/whitespace.
pub fn validate_embossed_name(s: &str) -> bool {
    check_embossed_name(s).is_ok()
}

/// `true` iff `n` is a month number.
pub fn validate_expiration_month(n: i64) -> bool {
    (MIN_EXPIRATION_MONTH..=MAX_EXPIRATION_MONTH).contains(&n)
}

/// `true` iff `n` is within the supported year range.
pub fn validate_expiration_year(n: i64) -> bool {
    (MIN_EXPIRATION_YEAR..=MAX_EXPIRATION_YEAR).contains(&n)
}

/// `true` iff `s` is `"Y"` or `"N"`.
pub fn validate_active_status(s: &str) -> bool {
    s == "Y" || s == "N"
}

/// `true` iff `s` is exactly 3 ASCII digits.
pub fn validate_cvv_code(s: &str) -> bool {
    is_digits(s, CVV_CODE_LENGTH)
}

/// `true` iff `s` is a `YYYY-MM-DD` calendar date whose year is in range.
pub fn validate_expiration_date(s: &str) -> bool {
    check_expiration_date(s).is_ok()
}

// -- Result-returning checks, used to build field error maps ------------------

/// Card number check with its error.
pub fn check_card_number(s: &str) -> Result<(), ValidationError> {
    validate_card_number(s)
        .then_some(())
        .ok_or(ValidationError::InvalidCardNumber)
}

/// Account id check with its error.
pub fn check_account_id(s: &str) -> Result<(), ValidationError> {
    validate_account_id(s)
        .then_some(())
        .ok_or(ValidationError::InvalidAccountId)
}

/// Embossed name check, distinguishing empty, too long, and bad characters.
pub fn check_embossed_name(s: &str) -> Result<(), ValidationError> {
    if s.is_empty() {
        return Err(ValidationError::EmptyEmbossedName);
    }
    if s.chars().count() > EMBOSSED_NAME_MAX_LENGTH {
        return Err(ValidationError::EmbossedNameTooLong);
    }
    if !s
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
    {
        return Err(ValidationError::InvalidEmbossedName);
    }
    Ok(())
}

/// CVV code check with its error.
pub fn check_cvv_code(s: &str) -> Result<(), ValidationError> {
    validate_cvv_code(s)
        .then_some(())
        .ok_or(ValidationError::InvalidCvvCode)
}

/// Active status check with its error.
pub fn check_active_status(s: &str) -> Result<(), ValidationError> {
    validate_active_status(s)
        .then_some(())
        .ok_or(ValidationError::InvalidActiveStatus)
}

/// Expiration month check with its error.
pub fn check_expiration_month(n: i64) -> Result<(), ValidationError> {
    validate_expiration_month(n)
        .then_some(())
        .ok_or(ValidationError::InvalidExpirationMonth)
}

/// Expiration year check with its error.
pub fn check_expiration_year(n: i64) -> Result<(), ValidationError> {
    validate_expiration_year(n)
        .then_some(())
        .ok_or(ValidationError::InvalidExpirationYear)
}

/// Expiration date check: a real `YYYY-MM-DD` date with a year in 1950..=2099.
///
/// The month needs no separate check; a parsed date always has one in range.
pub fn check_expiration_date(s: &str) -> Result<(), ValidationError> {
    let year = i64::from(ExpirationDate::parse(s)?.month_year().year);
    check_expiration_year(year).map_err(|_| ValidationError::ExpirationDateOutOfRange)
}
