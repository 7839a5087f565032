//! # Display Formatters
//!
//! Presentation helpers shared by every front end. None of these functions
//! fail: malformed input comes back unchanged (or as `None` for the parsers)
//! so a view can always render something.

use chrono::{Local, NaiveDate};

use crate::temporal::{ExpirationDate, MonthYear};
use crate::validate::{ACCOUNT_ID_LENGTH, CARD_NUMBER_LENGTH};

/// Group digits in fours: `"4111111111111111"` -> `"4111 1111 1111 1111"`.
///
/// Existing whitespace is dropped first, so already-grouped input is stable.
pub fn format_card_number(card_number: &str) -> String {
    let compact: Vec<char> = card_number.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mask all but the last four digits: `"**** **** **** 1111"`.
///
/// Input that is not 16 characters long is returned unchanged.
pub fn mask_card_number(card_number: &str) -> String {
    if card_number.chars().count() != CARD_NUMBER_LENGTH {
        return card_number.to_string();
    }
    let last_four: String = card_number.chars().skip(CARD_NUMBER_LENGTH - 4).collect();
    format!("**** **** **** {last_four}")
}

/// `3-4-4` grouping: `"12345678901"` -> `"123-4567-8901"`.
///
/// Input that is not 11 characters long is returned unchanged.
pub fn format_account_id(account_id: &str) -> String {
    let chars: Vec<char> = account_id.chars().collect();
    if chars.len() != ACCOUNT_ID_LENGTH {
        return account_id.to_string();
    }
    let a: String = chars[..3].iter().collect();
    let b: String = chars[3..7].iter().collect();
    let c: String = chars[7..].iter().collect();
    format!("{a}-{b}-{c}")
}

/// `YYYY-MM-DD` -> `MM/YY`. Unparseable input is returned unchanged.
pub fn format_expiration_date(date: &str) -> String {
    ExpirationDate::parse(date)
        .map(|d| d.to_month_slash_year())
        .unwrap_or_else(|_| date.to_string())
}

/// Split `YYYY-MM-DD` into its month and year.
pub fn parse_expiration_date(date: &str) -> Option<MonthYear> {
    ExpirationDate::parse(date).ok().map(|d| d.month_year())
}

/// Build `YYYY-MM-01` from a month and year.
///
/// The result is not range-checked; callers validate month and year first.
pub fn create_expiration_date(month: u32, year: i32) -> String {
    format!("{year:04}-{month:02}-01")
}

/// `true` iff `date` parses and is strictly before `today`.
pub fn is_card_expired(date: &str, today: NaiveDate) -> bool {
    ExpirationDate::parse(date)
        .map(|d| d.is_before(today))
        .unwrap_or(false)
}

/// [`is_card_expired`] against the local calendar date.
pub fn is_card_expired_now(date: &str) -> bool {
    is_card_expired(date, Local::now().date_naive())
}

/// `Y` -> `Active`, `N` -> `Inactive`; anything else unchanged.
pub fn format_active_status(code: &str) -> String {
    match code {
        "Y" => "Active".to_string(),
        "N" => "Inactive".to_string(),
        other => other.to_string(),
    }
}

/// Drop characters an embossed name may not contain, then trim.
pub fn sanitize_embossed_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}
