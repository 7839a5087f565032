//! Typed client for the credit card API.
//!
//! ## Paths
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/api/credit-cards?accountId&cardNumber&page` | List one page |
//! | POST   | `/api/credit-cards` | Create |
//! | GET    | `/api/credit-cards/search?accountId&cardNumber` | Search (at most one card) |
//! | GET    | `/api/credit-cards/{cardNumber}` | Get |
//! | PUT    | `/api/credit-cards/{cardNumber}` | Partial update |
//! | DELETE | `/api/credit-cards/{cardNumber}` | Delete |
//!
//! Every operation validates its input first; a rejected input returns
//! [`CardClientError::Validation`] without touching the network. Requests are
//! sent once. There is no retry.

use std::time::Duration;

use ccard_core::validate::{self, Validate};
use ccard_core::{
    CreateCreditCardRequest, CreditCard, CreditCardListResponse, DeleteCreditCardResponse,
    ListCardsParams, SearchCriteria, UpdateCreditCardRequest,
};
use serde::de::DeserializeOwned;

use crate::config::CardApiConfig;
use crate::credential::BearerToken;
use crate::error::CardClientError;

/// Path of the card collection, relative to the base URL.
const API_PREFIX: &str = "api/credit-cards";

/// Client for the credit card API.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct CardClient {
    http: reqwest::Client,
    base_url: url::Url,
    credential: Option<BearerToken>,
}

impl CardClient {
    /// Create a client without a credential.
    pub fn new(config: CardApiConfig) -> Result<Self, CardClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CardClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
            credential: None,
        })
    }

    /// A copy of this client that sends `credential` as its bearer token.
    pub fn with_credential(&self, credential: Option<BearerToken>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            credential,
        }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, suffix)
    }

    async fn send(
        &self,
        endpoint: &str,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, CardClientError> {
        let req = match &self.credential {
            Some(token) => req.bearer_auth(token.expose()),
            None => req,
        };
        tracing::debug!(endpoint, "calling card API");
        req.send().await.map_err(|e| CardClientError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }

    async fn into_error(endpoint: &str, resp: reqwest::Response) -> CardClientError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(endpoint, status, "card API returned an error status");
        CardClientError::from_status(endpoint.to_string(), status, body)
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: &str,
        resp: reqwest::Response,
    ) -> Result<T, CardClientError> {
        if !resp.status().is_success() {
            return Err(Self::into_error(endpoint, resp).await);
        }
        resp.json().await.map_err(|e| CardClientError::Deserialization {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }

    /// List one page of cards.
    ///
    /// Calls `GET {base_url}/api/credit-cards`. Both filters present means
    /// cards matching both.
    pub async fn list(
        &self,
        params: &ListCardsParams,
    ) -> Result<CreditCardListResponse, CardClientError> {
        params.validate()?;
        let endpoint = "GET /credit-cards";
        let url = self.url("");
        let resp = self
            .send(endpoint, self.http.get(&url).query(&params.normalized()))
            .await?;
        Self::decode(endpoint, resp).await
    }

    /// Fetch the page after `current_page` with the same filters.
    pub async fn next_page(
        &self,
        current_page: u32,
        params: &ListCardsParams,
    ) -> Result<CreditCardListResponse, CardClientError> {
        self.list(&params.with_page(i64::from(current_page) + 1))
            .await
    }

    /// Fetch the page before `current_page` with the same filters.
    ///
    /// On the first page this fails with [`CardClientError::AlreadyOnFirstPage`]
    /// and sends nothing.
    pub async fn previous_page(
        &self,
        current_page: u32,
        params: &ListCardsParams,
    ) -> Result<CreditCardListResponse, CardClientError> {
        if current_page <= 1 {
            return Err(CardClientError::AlreadyOnFirstPage);
        }
        self.list(&params.with_page(i64::from(current_page) - 1))
            .await
    }

    /// Get a card by number. `Ok(None)` when it does not exist.
    ///
    /// Calls `GET {base_url}/api/credit-cards/{cardNumber}`.
    pub async fn get(&self, card_number: &str) -> Result<Option<CreditCard>, CardClientError> {
        validate::check_card_number(card_number)?;
        let endpoint = "GET /credit-cards/{cardNumber}";
        let url = self.url(&format!("/{card_number}"));
        let resp = self.send(endpoint, self.http.get(&url)).await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::decode(endpoint, resp).await.map(Some)
    }

    /// Find at most one card by account id and/or card number.
    ///
    /// `Ok(None)` means no match. Calls `GET {base_url}/api/credit-cards/search`.
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Option<CreditCard>, CardClientError> {
        criteria.validate()?;
        let endpoint = "GET /credit-cards/search";
        let url = self.url("/search");
        let resp = self
            .send(endpoint, self.http.get(&url).query(&criteria.normalized()))
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::decode(endpoint, resp).await.map(Some)
    }

    /// Apply a partial update.
    ///
    /// A body card number that differs from `card_number` is rejected locally.
    /// A 409 from the API becomes [`CardClientError::Conflict`]; callers should
    /// re-fetch the card rather than resend the same write.
    pub async fn update(
        &self,
        card_number: &str,
        req: &UpdateCreditCardRequest,
    ) -> Result<CreditCard, CardClientError> {
        validate::check_card_number(card_number)?;
        req.check_path(card_number)?;
        req.validate()?;
        let endpoint = "PUT /credit-cards/{cardNumber}";
        let url = self.url(&format!("/{card_number}"));
        let resp = self.send(endpoint, self.http.put(&url).json(req)).await?;
        Self::decode(endpoint, resp).await
    }

    /// Create a card. Every field is validated locally first.
    ///
    /// Calls `POST {base_url}/api/credit-cards`.
    pub async fn create(
        &self,
        req: &CreateCreditCardRequest,
    ) -> Result<CreditCard, CardClientError> {
        req.validate()?;
        let endpoint = "POST /credit-cards";
        let url = self.url("");
        let resp = self.send(endpoint, self.http.post(&url).json(req)).await?;
        Self::decode(endpoint, resp).await
    }

    /// Delete a card by number.
    ///
    /// Calls `DELETE {base_url}/api/credit-cards/{cardNumber}`.
    pub async fn delete(
        &self,
        card_number: &str,
    ) -> Result<DeleteCreditCardResponse, CardClientError> {
        validate::check_card_number(card_number)?;
        let endpoint = "DELETE /credit-cards/{cardNumber}";
        let url = self.url(&format!("/{card_number}"));
        let resp = self.send(endpoint, self.http.delete(&url)).await?;
        Self::decode(endpoint, resp).await
    }
}
