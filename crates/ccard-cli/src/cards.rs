//! # Card Subcommands
//!
//! Each `run_*` function binds command-line input to the core validators and
//! the card client, writes the outcome to `out`, and returns the exit code.
//! Expected outcomes (invalid input, no such card, edit conflict, first page)
//! are rendered and mapped to a code; transport and server failures are
//! returned as errors for `main` to log.

use std::io::Write;

use anyhow::Result;
use ccard_client::{CardClient, CardClientError};
use ccard_core::{
    CreateCreditCardRequest, ListCardsParams, SearchCriteria, UpdateCreditCardRequest,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use serde::Serialize;

use crate::render;
use crate::{EXIT_CONFLICT, EXIT_INVALID, EXIT_NOT_FOUND, EXIT_OK};

/// Output options shared by every card subcommand.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    /// Print the raw JSON response instead of the formatted view.
    pub json: bool,
    /// Show full card numbers in detail views.
    pub full_numbers: bool,
    /// Reference date for the expired flag.
    pub today: Option<NaiveDate>,
}

impl Output {
    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Render an expected failure, or hand back anything else.
fn report(err: CardClientError, card_number: Option<&str>, out: &mut dyn Write) -> Result<u8> {
    if let Some(fields) = err.field_errors() {
        write!(out, "{}", render::field_errors(fields))?;
        return Ok(EXIT_INVALID);
    }
    match err {
        CardClientError::Validation(e) => {
            let message = e.to_string();
            match e.into_field_errors() {
                Some(fields) => write!(out, "{}", render::field_errors(&fields))?,
                None => writeln!(out, "{message}")?,
            }
            Ok(EXIT_INVALID)
        }
        CardClientError::BadRequest { message, .. } => {
            writeln!(out, "{message}")?;
            Ok(EXIT_INVALID)
        }
        CardClientError::AlreadyOnFirstPage => {
            writeln!(out, "Already on the first page.")?;
            Ok(EXIT_INVALID)
        }
        CardClientError::NotFound { .. } => {
            writeln!(out, "Credit card not found.")?;
            Ok(EXIT_NOT_FOUND)
        }
        CardClientError::Conflict { .. } => {
            write!(out, "{}", render::conflict_prompt(card_number.unwrap_or("<card>")))?;
            Ok(EXIT_CONFLICT)
        }
        other => Err(other.into()),
    }
}

// ── list ────────────────────────────────────────────────────────────

/// Arguments for `ccard list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only cards of this 11-digit account.
    #[arg(long)]
    pub account_id: Option<String>,

    /// Only this 16-digit card number.
    #[arg(long)]
    pub card_number: Option<String>,

    /// 1-based page number.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Show the page after `--page`.
    #[arg(long, conflicts_with = "prev")]
    pub next: bool,

    /// Show the page before `--page`.
    #[arg(long)]
    pub prev: bool,
}

pub async fn run_list(
    args: &ListArgs,
    client: &CardClient,
    output: Output,
    out: &mut dyn Write,
) -> Result<u8> {
    let params = ListCardsParams {
        account_id: args.account_id.clone(),
        card_number: args.card_number.clone(),
        page: None,
    };
    let result = if args.next {
        client.next_page(args.page, &params).await
    } else if args.prev {
        client.previous_page(args.page, &params).await
    } else {
        client.list(&params.with_page(i64::from(args.page))).await
    };
    match result {
        Ok(page) if output.json => write_json(out, &page).map(|()| EXIT_OK),
        Ok(page) => {
            write!(out, "{}", render::card_page(&page, &params))?;
            Ok(EXIT_OK)
        }
        Err(err) => report(err, None, out),
    }
}

// ── search ──────────────────────────────────────────────────────────

/// Arguments for `ccard search`. At least one criterion is required.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// 11-digit account id.
    #[arg(long)]
    pub account_id: Option<String>,

    /// 16-digit card number.
    #[arg(long)]
    pub card_number: Option<String>,
}

pub async fn run_search(
    args: &SearchArgs,
    client: &CardClient,
    output: Output,
    out: &mut dyn Write,
) -> Result<u8> {
    let criteria = SearchCriteria {
        account_id: args.account_id.clone(),
        card_number: args.card_number.clone(),
    };
    match client.search(&criteria).await {
        Ok(Some(card)) if output.json => write_json(out, &card).map(|()| EXIT_OK),
        Ok(Some(card)) => {
            write!(out, "{}", render::card_detail(&card, output.today(), output.full_numbers))?;
            Ok(EXIT_OK)
        }
        Ok(None) => {
            writeln!(out, "No credit card matches the search criteria.")?;
            Ok(EXIT_NOT_FOUND)
        }
        Err(err) => report(err, None, out),
    }
}

// ── show ────────────────────────────────────────────────────────────

/// Arguments for `ccard show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// 16-digit card number.
    pub card_number: String,
}

pub async fn run_show(
    args: &ShowArgs,
    client: &CardClient,
    output: Output,
    out: &mut dyn Write,
) -> Result<u8> {
    match client.get(&args.card_number).await {
        Ok(Some(card)) if output.json => write_json(out, &card).map(|()| EXIT_OK),
        Ok(Some(card)) => {
            write!(out, "{}", render::card_detail(&card, output.today(), output.full_numbers))?;
            Ok(EXIT_OK)
        }
        Ok(None) => {
            writeln!(out, "Credit card not found.")?;
            Ok(EXIT_NOT_FOUND)
        }
        Err(err) => report(err, Some(&args.card_number), out),
    }
}

// ── edit ────────────────────────────────────────────────────────────

/// Arguments for `ccard edit`. Only the given fields change.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// 16-digit card number.
    pub card_number: String,

    /// New name on the card (letters and spaces, at most 50).
    #[arg(long)]
    pub name: Option<String>,

    /// New status: `Y` (active) or `N` (inactive).
    #[arg(long)]
    pub status: Option<String>,

    /// New expiration month, 1-12.
    #[arg(long, allow_negative_numbers = true)]
    pub month: Option<i64>,

    /// New expiration year, 1950-2099.
    #[arg(long, allow_negative_numbers = true)]
    pub year: Option<i64>,

    /// Account id the card must belong to.
    #[arg(long)]
    pub account_id: Option<String>,
}

impl EditArgs {
    fn to_request(&self) -> UpdateCreditCardRequest {
        UpdateCreditCardRequest {
            card_number: Some(self.card_number.clone()),
            account_id: self.account_id.clone(),
            embossed_name: self.name.clone(),
            active_status: self.status.as_ref().map(|s| s.trim().to_uppercase()),
            expiration_month: self.month,
            expiration_year: self.year,
        }
    }
}

pub async fn run_edit(
    args: &EditArgs,
    client: &CardClient,
    output: Output,
    out: &mut dyn Write,
) -> Result<u8> {
    let req = args.to_request();
    if req.is_empty() {
        writeln!(
            out,
            "Nothing to change: pass at least one of --name, --status, --month, --year."
        )?;
        return Ok(EXIT_INVALID);
    }
    match client.update(&args.card_number, &req).await {
        Ok(card) if output.json => write_json(out, &card).map(|()| EXIT_OK),
        Ok(card) => {
            writeln!(out, "Credit card updated.\n")?;
            write!(out, "{}", render::card_detail(&card, output.today(), output.full_numbers))?;
            Ok(EXIT_OK)
        }
        Err(err) => report(err, Some(&args.card_number), out),
    }
}

// ── create ──────────────────────────────────────────────────────────

/// Arguments for `ccard create`.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// 16-digit card number.
    #[arg(long)]
    pub card_number: String,

    /// 11-digit account id.
    #[arg(long)]
    pub account_id: String,

    /// Name on the card.
    #[arg(long)]
    pub name: String,

    /// 3-digit security code.
    #[arg(long)]
    pub cvv: String,

    /// Expiration date, `YYYY-MM-DD`.
    #[arg(long)]
    pub expires: String,

    /// Status: `Y` (active) or `N` (inactive).
    #[arg(long, default_value = "Y")]
    pub status: String,
}

impl CreateArgs {
    fn to_request(&self) -> CreateCreditCardRequest {
        CreateCreditCardRequest {
            card_number: self.card_number.clone(),
            account_id: self.account_id.clone(),
            embossed_name: self.name.clone(),
            cvv_code: self.cvv.clone(),
            expiration_date: self.expires.clone(),
            active_status: self.status.trim().to_uppercase(),
        }
    }
}

pub async fn run_create(
    args: &CreateArgs,
    client: &CardClient,
    output: Output,
    out: &mut dyn Write,
) -> Result<u8> {
    match client.create(&args.to_request()).await {
        Ok(card) if output.json => write_json(out, &card).map(|()| EXIT_OK),
        Ok(card) => {
            writeln!(out, "Credit card created.\n")?;
            write!(out, "{}", render::card_detail(&card, output.today(), output.full_numbers))?;
            Ok(EXIT_OK)
        }
        Err(CardClientError::Conflict { .. }) => {
            writeln!(out, "A credit card with this number already exists.")?;
            Ok(EXIT_CONFLICT)
        }
        Err(err) => report(err, Some(&args.card_number), out),
    }
}

// ── delete ──────────────────────────────────────────────────────────

/// Arguments for `ccard delete`.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// 16-digit card number.
    pub card_number: String,
}

pub async fn run_delete(
    args: &DeleteArgs,
    client: &CardClient,
    output: Output,
    out: &mut dyn Write,
) -> Result<u8> {
    match client.delete(&args.card_number).await {
        Ok(resp) if output.json => write_json(out, &resp).map(|()| EXIT_OK),
        Ok(resp) => {
            writeln!(out, "{}", resp.message)?;
            Ok(EXIT_OK)
        }
        Err(err) => report(err, Some(&args.card_number), out),
    }
}
