//! # Card Records and Request Shapes
//!
//! Wire types shared by the client, the forwarding service and the upstream
//! stub. All field names are camelCase on the wire.
//!
//! Response types ([`CreditCard`], [`CreditCardListItem`],
//! [`CreditCardListResponse`]) use the validated newtypes, so a malformed
//! upstream record fails to deserialize. Request types carry raw strings and
//! integers instead: a form submission with five bad fields must come back
//! with five messages, not with the first serde error.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{field, FieldErrors, ValidationError};
use crate::identity::{AccountId, ActiveStatus, CardNumber, CvvCode, EmbossedName};
use crate::temporal::{lenient_timestamp, ExpirationDate};
use crate::validate::{self, Validate};

/// Rows per list page.
pub const PAGE_SIZE: usize = 7;

/// Highest page a list response can report.
pub const MAX_PAGE: i64 = u32::MAX as i64;

/// Message returned by a successful delete.
pub const DELETE_SUCCESS_MESSAGE: &str = "Credit card deleted successfully";

/// A credit card as returned for display.
///
/// The CVV code is write-only: it is accepted at creation and never read
/// back. An upstream `cvvCode` field is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub card_number: CardNumber,
    pub account_id: AccountId,
    pub embossed_name: String,
    pub expiration_date: ExpirationDate,
    pub active_status: ActiveStatus,
    #[serde(default, with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = DateTime))]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = DateTime))]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CreditCard {
    /// `true` iff the expiration date is strictly before `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiration_date.is_before(today)
    }

    /// The list-row projection of this card.
    pub fn to_list_item(&self) -> CreditCardListItem {
        CreditCardListItem {
            card_number: self.card_number.clone(),
            account_id: self.account_id.clone(),
            active_status: self.active_status,
        }
    }
}

/// One row of a list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreditCardListItem {
    pub card_number: CardNumber,
    pub account_id: AccountId,
    pub active_status: ActiveStatus,
}

/// One page of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreditCardListResponse {
    pub cards: Vec<CreditCardListItem>,
    /// 1-based.
    pub current_page: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub total_records_on_page: usize,
}

/// Body of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeleteCreditCardResponse {
    pub message: String,
}

impl DeleteCreditCardResponse {
    /// The canonical success body.
    pub fn deleted() -> Self {
        Self {
            message: DELETE_SUCCESS_MESSAGE.to_string(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Query of the list endpoint.
///
/// When both filters are present the upstream applies them conjunctively:
/// only cards matching the account id AND the card number are returned.
/// Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
pub struct ListCardsParams {
    /// 11-digit account filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// 16-digit card filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    /// 1-based page number; defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
}

impl ListCardsParams {
    /// Account filter, if non-empty.
    pub fn account_id(&self) -> Option<&str> {
        non_empty(&self.account_id)
    }

    /// Card filter, if non-empty.
    pub fn card_number(&self) -> Option<&str> {
        non_empty(&self.card_number)
    }

    /// Requested page, defaulting to 1.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }

    /// Same filters, different page.
    pub fn with_page(&self, page: i64) -> Self {
        Self {
            page: Some(page),
            ..self.clone()
        }
    }

    /// Copy with empty filters dropped.
    pub fn normalized(&self) -> Self {
        Self {
            account_id: self.account_id().map(str::to_string),
            card_number: self.card_number().map(str::to_string),
            page: self.page,
        }
    }
}

impl Validate for ListCardsParams {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        if let Some(account_id) = self.account_id() {
            errors.check(validate::check_account_id(account_id));
        }
        if let Some(card_number) = self.card_number() {
            errors.check(validate::check_card_number(card_number));
        }
        if !(1..=MAX_PAGE).contains(&self.page()) {
            errors.insert(field::PAGE, ValidationError::InvalidPage.to_string());
        }
        errors.into_result()
    }
}

/// Query of the search endpoint. At least one criterion is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    /// 11-digit account id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// 16-digit card number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
}

impl SearchCriteria {
    /// Search by account only.
    pub fn by_account(account_id: impl Into<String>) -> Self {
        Self {
            account_id: Some(account_id.into()),
            card_number: None,
        }
    }

    /// Search by card only.
    pub fn by_card(card_number: impl Into<String>) -> Self {
        Self {
            account_id: None,
            card_number: Some(card_number.into()),
        }
    }

    /// Account criterion, if non-empty.
    pub fn account_id(&self) -> Option<&str> {
        non_empty(&self.account_id)
    }

    /// Card criterion, if non-empty.
    pub fn card_number(&self) -> Option<&str> {
        non_empty(&self.card_number)
    }

    /// Copy with empty criteria dropped.
    pub fn normalized(&self) -> Self {
        Self {
            account_id: self.account_id().map(str::to_string),
            card_number: self.card_number().map(str::to_string),
        }
    }
}

impl Validate for SearchCriteria {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.account_id().is_none() && self.card_number().is_none() {
            return Err(ValidationError::MissingSearchCriterion);
        }
        let mut errors = FieldErrors::new();
        if let Some(account_id) = self.account_id() {
            errors.check(validate::check_account_id(account_id));
        }
        if let Some(card_number) = self.card_number() {
            errors.check(validate::check_card_number(card_number));
        }
        errors.into_result()
    }
}

/// Body of a create request. Every field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateCreditCardRequest {
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub embossed_name: String,
    #[serde(default)]
    pub cvv_code: String,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub expiration_date: String,
    /// `Y` or `N`
    #[serde(default)]
    pub active_status: String,
}

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCreditCard {
    pub card_number: CardNumber,
    pub account_id: AccountId,
    pub embossed_name: EmbossedName,
    pub cvv_code: CvvCode,
    pub expiration_date: ExpirationDate,
    pub active_status: ActiveStatus,
}

impl CreateCreditCardRequest {
    /// Validate every field and convert to typed values.
    pub fn into_new_card(self) -> Result<NewCreditCard, ValidationError> {
        self.validate()?;
        Ok(NewCreditCard {
            card_number: CardNumber::new(self.card_number)?,
            account_id: AccountId::new(self.account_id)?,
            embossed_name: EmbossedName::new(self.embossed_name)?,
            cvv_code: CvvCode::new(self.cvv_code)?,
            expiration_date: ExpirationDate::parse(&self.expiration_date)?,
            active_status: ActiveStatus::from_code(&self.active_status)?,
        })
    }
}

impl Validate for CreateCreditCardRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        errors.check(validate::check_card_number(&self.card_number));
        errors.check(validate::check_account_id(&self.account_id));
        errors.check(validate::check_embossed_name(&self.embossed_name));
        errors.check(validate::check_cvv_code(&self.cvv_code));
        errors.check(validate::check_expiration_date(&self.expiration_date));
        errors.check(validate::check_active_status(&self.active_status));
        errors.into_result()
    }
}

/// Body of an update request.
///
/// Only `embossedName`, `activeStatus`, `expirationMonth` and
/// `expirationYear` are mutable. `cardNumber` and `accountId` may be echoed
/// back as identity checks; they never change the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateCreditCardRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embossed_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_month: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_year: Option<i64>,
}

impl UpdateCreditCardRequest {
    /// Reject a body whose card number differs from the one addressed by the path.
    pub fn check_path(&self, path_card_number: &str) -> Result<(), ValidationError> {
        match self.card_number.as_deref() {
            Some(body) if body != path_card_number => Err(ValidationError::CardNumberMismatch),
            _ => Ok(()),
        }
    }

    /// `true` iff no mutable field is present.
    pub fn is_empty(&self) -> bool {
        self.embossed_name.is_none()
            && self.active_status.is_none()
            && self.expiration_month.is_none()
            && self.expiration_year.is_none()
    }
}

impl Validate for UpdateCreditCardRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        if let Some(card_number) = &self.card_number {
            errors.check(validate::check_card_number(card_number));
        }
        if let Some(account_id) = &self.account_id {
            errors.check(validate::check_account_id(account_id));
        }
        if let Some(name) = &self.embossed_name {
            errors.check(validate::check_embossed_name(name));
        }
        if let Some(status) = &self.active_status {
            errors.check(validate::check_active_status(status));
        }
        if let Some(month) = self.expiration_month {
            errors.check(validate::check_expiration_month(month));
        }
        if let Some(year) = self.expiration_year {
            errors.check(validate::check_expiration_year(year));
        }
        errors.into_result()
    }
}
