//! # Terminal Rendering
//!
//! Pure functions from domain values to display text. Card numbers are
//! masked unless the caller asks for the full number, account ids are
//! grouped `3-4-4`, status codes become labels and expiry is shown `MM/YY`.

use std::fmt::Write as _;

use ccard_core::format::{format_account_id, format_card_number, mask_card_number};
use ccard_core::{CreditCard, CreditCardListResponse, FieldErrors, ListCardsParams};
use chrono::NaiveDate;

/// Multi-line detail view of one card.
pub fn card_detail(card: &CreditCard, today: NaiveDate, full_number: bool) -> String {
    let number = if full_number {
        format_card_number(card.card_number.as_str())
    } else {
        mask_card_number(card.card_number.as_str())
    };
    let expired = if card.is_expired(today) { "  (EXPIRED)" } else { "" };

    let mut out = String::new();
    let _ = writeln!(out, "Card number:   {number}");
    let _ = writeln!(out, "Account:       {}", format_account_id(card.account_id.as_str()));
    let _ = writeln!(out, "Name on card:  {}", card.embossed_name);
    let _ = writeln!(
        out,
        "Expires:       {}{expired}",
        card.expiration_date.to_month_slash_year()
    );
    let _ = writeln!(out, "Status:        {}", card.active_status.label());
    if let Some(created) = card.created_at {
        let _ = writeln!(out, "Created:       {}", created.format("%Y-%m-%d %H:%M UTC"));
    }
    if let Some(updated) = card.updated_at {
        let _ = writeln!(out, "Updated:       {}", updated.format("%Y-%m-%d %H:%M UTC"));
    }
    out
}

/// One page of the card list, with navigation hints.
pub fn card_page(page: &CreditCardListResponse, params: &ListCardsParams) -> String {
    let mut out = String::new();
    if page.cards.is_empty() {
        out.push_str("No credit cards found.\n");
    } else {
        let _ = writeln!(out, "{:<21}  {:<13}  STATUS", "CARD", "ACCOUNT");
        for card in &page.cards {
            let _ = writeln!(
                out,
                "{:<21}  {:<13}  {}",
                mask_card_number(card.card_number.as_str()),
                format_account_id(card.account_id.as_str()),
                card.active_status.label()
            );
        }
    }
    let _ = writeln!(
        out,
        "\nPage {} ({} card{})",
        page.current_page,
        page.total_records_on_page,
        if page.total_records_on_page == 1 { "" } else { "s" }
    );
    out.push_str(&page_hints(page, params));
    out
}

/// `ccard list ...` commands for the neighbouring pages, if any.
pub fn page_hints(page: &CreditCardListResponse, params: &ListCardsParams) -> String {
    let mut filters = String::new();
    if let Some(account) = params.account_id() {
        let _ = write!(filters, " --account-id {account}");
    }
    if let Some(number) = params.card_number() {
        let _ = write!(filters, " --card-number {number}");
    }

    let mut out = String::new();
    if page.has_previous_page {
        let _ = writeln!(
            out,
            "Previous: ccard list{filters} --page {}",
            page.current_page.saturating_sub(1)
        );
    }
    if page.has_next_page {
        let _ = writeln!(
            out,
            "Next:     ccard list{filters} --page {}",
            page.current_page.saturating_add(1)
        );
    }
    out
}

/// One line per rejected field.
pub fn field_errors(errors: &FieldErrors) -> String {
    let mut out = String::from("Please correct the following:\n");
    for (field, message) in errors.iter() {
        let _ = writeln!(out, "  {field}: {message}");
    }
    out
}

/// Shown when an edit lost an optimistic-concurrency race.
pub fn conflict_prompt(card_number: &str) -> String {
    format!(
        "This card was changed by someone else after you loaded it.\n\
         Reload it with `ccard show {card_number}` and apply your edit again.\n"
    )
}
