//! # Card Identity Newtypes
//!
//! Validated wrappers for the card fields. A value of one of these types has
//! passed the matching predicate in [`crate::validate`]; both construction and
//! deserialization go through `TryFrom<String>`, so a malformed wire value
//! fails to deserialize instead of producing an invalid record.
//!
//! [`CardNumber`] and [`CvvCode`] render a masked `Debug` so that they can be
//! logged with `?card` without leaking the value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validate;

/// 16-digit card number. Unique identifier of a card; immutable.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", schema(value_type = String, example = "4111111111111111"))]
#[serde(try_from = "String", into = "String")]
pub struct CardNumber(String);

impl CardNumber {
    /// Validate and wrap a card number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        validate::check_card_number(&value)?;
        Ok(Self(value))
    }

    /// The 16 digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last four digits.
    pub fn last_four(&self) -> &str {
        &self.0[self.0.len() - 4..]
    }
}

impl TryFrom<String> for CardNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CardNumber> for String {
    fn from(value: CardNumber) -> Self {
        value.0
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardNumber(****{})", self.last_four())
    }
}

impl std::str::FromStr for CardNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// 11-digit account identifier.
///
/// The upstream backend stores the account as a 64-bit integer, so the wire
/// value may arrive as a JSON number. Numbers are left-padded with zeros to
/// 11 digits; the value always serializes as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", schema(value_type = String, example = "12345678901"))]
#[serde(try_from = "AccountIdRepr", into = "String")]
pub struct AccountId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum AccountIdRepr {
    Text(String),
    Number(u64),
}

impl TryFrom<AccountIdRepr> for AccountId {
    type Error = ValidationError;

    fn try_from(value: AccountIdRepr) -> Result<Self, Self::Error> {
        match value {
            AccountIdRepr::Text(s) => Self::new(s),
            AccountIdRepr::Number(n) => Self::new(format!("{n:011}")),
        }
    }
}

impl AccountId {
    /// Validate and wrap an account id.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        validate::check_account_id(&value)?;
        Ok(Self(value))
    }

    /// The 11 digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for AccountId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Cardholder name as printed on the card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", schema(value_type = String, example = "JOHN Q PUBLIC"))]
#[serde(try_from = "String", into = "String")]
pub struct EmbossedName(String);

impl EmbossedName {
    /// Validate and wrap an embossed name.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        validate::check_embossed_name(&value)?;
        Ok(Self(value))
    }

    /// The name as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmbossedName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmbossedName> for String {
    fn from(value: EmbossedName) -> Self {
        value.0
    }
}

impl fmt::Display for EmbossedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 3-digit card verification code. Accepted at creation only.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CvvCode(String);

impl CvvCode {
    /// Validate and wrap a CVV code.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        validate::check_cvv_code(&value)?;
        Ok(Self(value))
    }

    /// The digits. Callers must not log this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CvvCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CvvCode> for String {
    fn from(value: CvvCode) -> Self {
        value.0
    }
}

impl fmt::Debug for CvvCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CvvCode(***)")
    }
}

/// Whether a card is usable. Encoded on the wire as `"Y"` / `"N"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ActiveStatus {
    /// `Y`
    #[serde(rename = "Y")]
    Active,
    /// `N`
    #[serde(rename = "N")]
    Inactive,
}

impl ActiveStatus {
    /// Wire code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Active => "Y",
            Self::Inactive => "N",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    /// Parse a wire code.
    pub fn from_code(code: &str) -> Result<Self, ValidationError> {
        match code {
            "Y" => Ok(Self::Active),
            "N" => Ok(Self::Inactive),
            _ => Err(ValidationError::InvalidActiveStatus),
        }
    }

    /// `true` for [`ActiveStatus::Active`].
    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

impl fmt::Display for ActiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for ActiveStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}
