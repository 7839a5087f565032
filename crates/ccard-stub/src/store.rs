//! In-memory card storage backed by a `DashMap` keyed by card number.
//!
//! Listing and account-only search walk the map and sort by card number, so
//! results are stable across calls. Data is lost on restart.

use std::sync::Arc;

use ccard_core::{
    AccountId, ActiveStatus, CardNumber, CreditCard, CreditCardListItem, CreditCardListResponse,
    CvvCode, EmbossedName, ExpirationDate, ListCardsParams, NewCreditCard, SearchCriteria,
    UpdateCreditCardRequest, MAX_PAGE, PAGE_SIZE,
};
use chrono::{Datelike, NaiveDate, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// A stored card. The CVV is kept but never returned.
#[derive(Debug, Clone)]
pub struct StoredCard {
    pub card: CreditCard,
    pub cvv_code: CvvCode,
}

/// Why an insert was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    /// A card with this number already exists.
    Duplicate,
}

/// Why an update was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// No card with this number.
    NotFound,
    /// The body's account id does not own the card.
    AccountMismatch,
}

/// Shared card store.
///
/// Cheaply cloneable via `Arc`; all clones share the same data.
#[derive(Clone, Default)]
pub struct CardStore {
    cards: Arc<DashMap<String, StoredCard>>,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with [`demo_cards`].
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        for card in demo_cards() {
            // Demo numbers are distinct.
            let _ = store.insert(card);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    fn sorted(&self, keep: impl Fn(&CreditCard) -> bool) -> Vec<CreditCard> {
        let mut cards: Vec<CreditCard> = self
            .cards
            .iter()
            .filter(|entry| keep(&entry.value().card))
            .map(|entry| entry.value().card.clone())
            .collect();
        cards.sort_by(|a, b| a.card_number.cmp(&b.card_number));
        cards
    }

    /// One page of cards matching every present filter.
    ///
    /// `params` must already be validated; a page outside `1..=MAX_PAGE` is
    /// clamped into it.
    pub fn list(&self, params: &ListCardsParams) -> CreditCardListResponse {
        let account = params.account_id();
        let number = params.card_number();
        let matching = self.sorted(|card| {
            account.map_or(true, |a| card.account_id.as_str() == a)
                && number.map_or(true, |n| card.card_number.as_str() == n)
        });

        let page = u32::try_from(params.page().clamp(1, MAX_PAGE)).unwrap_or(u32::MAX);
        let start = usize::try_from(page - 1)
            .unwrap_or(usize::MAX)
            .saturating_mul(PAGE_SIZE);
        let cards: Vec<CreditCardListItem> = matching
            .iter()
            .skip(start)
            .take(PAGE_SIZE)
            .map(CreditCard::to_list_item)
            .collect();

        CreditCardListResponse {
            total_records_on_page: cards.len(),
            cards,
            current_page: page,
            has_next_page: matching.len() > start.saturating_add(PAGE_SIZE),
            has_previous_page: page > 1,
        }
    }

    /// At most one card.
    ///
    /// Both criteria: exact match on both. Card only: that card. Account
    /// only: the account's first card in card-number order.
    pub fn search(&self, criteria: &SearchCriteria) -> Option<CreditCard> {
        match (criteria.account_id(), criteria.card_number()) {
            (Some(account), Some(number)) => self
                .get(number)
                .filter(|card| card.account_id.as_str() == account),
            (None, Some(number)) => self.get(number),
            (Some(account), None) => self
                .sorted(|card| card.account_id.as_str() == account)
                .into_iter()
                .next(),
            (None, None) => None,
        }
    }

    pub fn get(&self, card_number: &str) -> Option<CreditCard> {
        self.cards.get(card_number).map(|entry| entry.card.clone())
    }

    /// Insert a new card, stamping both timestamps.
    pub fn insert(&self, new_card: NewCreditCard) -> Result<CreditCard, InsertError> {
        match self.cards.entry(new_card.card_number.as_str().to_string()) {
            Entry::Occupied(_) => Err(InsertError::Duplicate),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let card = CreditCard {
                    card_number: new_card.card_number,
                    account_id: new_card.account_id,
                    embossed_name: new_card.embossed_name.as_str().trim().to_uppercase(),
                    expiration_date: new_card.expiration_date,
                    active_status: new_card.active_status,
                    created_at: Some(now),
                    updated_at: Some(now),
                };
                slot.insert(StoredCard {
                    card: card.clone(),
                    cvv_code: new_card.cvv_code,
                });
                Ok(card)
            }
        }
    }

    /// Apply a validated partial update.
    ///
    /// The name is stored trimmed and upper-cased. A new month or year keeps
    /// the other component and the day of the current expiration date.
    pub fn update(
        &self,
        card_number: &str,
        req: &UpdateCreditCardRequest,
    ) -> Result<CreditCard, UpdateError> {
        let mut entry = self.cards.get_mut(card_number).ok_or(UpdateError::NotFound)?;
        let card = &mut entry.card;

        if let Some(account) = req.account_id.as_deref() {
            if card.account_id.as_str() != account {
                return Err(UpdateError::AccountMismatch);
            }
        }

        if let Some(name) = &req.embossed_name {
            card.embossed_name = name.trim().to_uppercase();
        }
        if let Some(status) = req.active_status.as_deref() {
            if let Ok(status) = ActiveStatus::from_code(status) {
                card.active_status = status;
            }
        }
        if req.expiration_month.is_some() || req.expiration_year.is_some() {
            let current = card.expiration_date.date();
            let month = req
                .expiration_month
                .and_then(|m| u32::try_from(m).ok())
                .unwrap_or(current.month());
            let year = req
                .expiration_year
                .and_then(|y| i32::try_from(y).ok())
                .unwrap_or(current.year());
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, current.day())
                .or_else(|| NaiveDate::from_ymd_opt(year, month, 1))
            {
                card.expiration_date = ExpirationDate::from_date(date);
            }
        }
        card.updated_at = Some(Utc::now());
        Ok(card.clone())
    }

    pub fn remove(&self, card_number: &str) -> bool {
        self.cards.remove(card_number).is_some()
    }
}

/// Twelve demo cards over two accounts, enough to fill more than one page.
pub fn demo_cards() -> Vec<NewCreditCard> {
    const ROWS: &[(&str, &str, &str, &str, &str, &str)] = &[
        ("4111111111111111", "10000000001", "ALICE CARTER", "123", "2027-05-01", "Y"),
        ("4111111111111129", "10000000001", "ALICE CARTER", "456", "2024-01-01", "N"),
        ("4111111111111137", "10000000001", "ALICE M CARTER", "789", "2029-11-01", "Y"),
        ("4111111111111145", "10000000001", "ALICE CARTER", "321", "2028-02-01", "Y"),
        ("4111111111111152", "10000000001", "ALICE CARTER", "654", "2026-08-01", "N"),
        ("4111111111111160", "10000000001", "ALICE CARTER", "987", "2030-03-01", "Y"),
        ("4111111111111178", "10000000001", "ALICE CARTER", "147", "2031-07-01", "Y"),
        ("4111111111111186", "10000000001", "ALICE CARTER", "258", "2027-12-01", "Y"),
        ("5500000000000004", "20000000002", "BOB NGUYEN", "369", "2028-09-01", "Y"),
        ("5500000000000012", "20000000002", "BOB NGUYEN", "159", "2025-04-01", "N"),
        ("5500000000000020", "20000000002", "BOB T NGUYEN", "753", "2032-01-01", "Y"),
        ("5500000000000038", "20000000002", "BOB NGUYEN", "852", "2029-06-01", "Y"),
    ];

    ROWS.iter()
        .filter_map(|(number, account, name, cvv, date, status)| {
            Some(NewCreditCard {
                card_number: CardNumber::new(*number).ok()?,
                account_id: AccountId::new(*account).ok()?,
                embossed_name: EmbossedName::new(*name).ok()?,
                cvv_code: CvvCode::new(*cvv).ok()?,
                expiration_date: ExpirationDate::parse(date).ok()?,
                active_status: ActiveStatus::from_code(status).ok()?,
            })
        })
        .collect()
}
