//! # Expiration Dates and Server Timestamps
//!
//! [`ExpirationDate`] is a calendar date carried on the wire as `YYYY-MM-DD`.
//! Cards expire on the first of a month, so the editing forms work with a
//! [`MonthYear`] pair and rebuild the date with day `01`.
//!
//! Server timestamps (`createdAt`, `updatedAt`) are optional. The upstream
//! backend emits either RFC 3339 or a naive local datetime without offset;
//! [`lenient_timestamp`] accepts both and reads a naive value as UTC.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validate;

/// Wire format of an expiration date.
pub const EXPIRATION_DATE_FORMAT: &str = "%Y-%m-%d";

/// Month/year pair used by the editing forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MonthYear {
    /// 1..=12
    pub month: u32,
    /// 1950..=2099
    pub year: i32,
}

impl MonthYear {
    /// Validate a month/year pair.
    pub fn new(month: i64, year: i64) -> Result<Self, ValidationError> {
        let mut errors = crate::FieldErrors::new();
        errors.check(validate::check_expiration_month(month));
        errors.check(validate::check_expiration_year(year));
        errors.into_result()?;
        // Both bounds checked above; the casts cannot truncate.
        Ok(Self {
            month: month as u32,
            year: year as i32,
        })
    }
}

/// A card expiration date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", schema(value_type = String, format = Date, example = "2027-05-01"))]
#[serde(try_from = "String", into = "String")]
pub struct ExpirationDate(NaiveDate);

impl ExpirationDate {
    /// Parse a strict `YYYY-MM-DD` string naming a real calendar date.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let b = s.as_bytes();
        let shaped = b.len() == 10
            && b[4] == b'-'
            && b[7] == b'-'
            && b
                .iter()
                .enumerate()
                .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
        if !shaped {
            return Err(ValidationError::InvalidExpirationDate);
        }
        NaiveDate::parse_from_str(s, EXPIRATION_DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidExpirationDate)
    }

    /// The first day of the given month.
    pub fn from_month_year(my: MonthYear) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(my.year, my.month, 1)
            .map(Self)
            .ok_or(ValidationError::InvalidExpirationDate)
    }

    /// Wrap a `chrono` date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The underlying date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Month and year of this date.
    pub fn month_year(&self) -> MonthYear {
        MonthYear {
            month: self.0.month(),
            year: self.0.year(),
        }
    }

    /// `true` iff this date is strictly before `today`.
    pub fn is_before(&self, today: NaiveDate) -> bool {
        self.0 < today
    }

    /// `MM/YY` display form.
    pub fn to_month_slash_year(&self) -> String {
        format!("{:02}/{:02}", self.0.month(), self.0.year().rem_euclid(100))
    }
}

impl TryFrom<String> for ExpirationDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ExpirationDate> for String {
    fn from(value: ExpirationDate) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ExpirationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(EXPIRATION_DATE_FORMAT))
    }
}

/// Serde helpers for optional server timestamps.
pub mod lenient_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Parse RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS[.fff]` read as UTC.
    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Deserialize an optional timestamp. Unparseable values become `None`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }

    /// Serialize as RFC 3339 with a `Z` suffix.
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)),
            None => serializer.serialize_none(),
        }
    }
}
