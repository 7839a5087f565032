//! # Credit Card Routes
//!
//! Forwarding handlers for the card collection. Each handler validates its
//! input, forwards to the upstream card API with the caller's credential,
//! and lets [`AppError`] shape every failure into the error envelope.
//!
//! | Method | Path | Upstream call |
//! |--------|------|---------------|
//! | GET    | `/api/credit-cards` | list |
//! | POST   | `/api/credit-cards` | create |
//! | GET    | `/api/credit-cards/search` | search |
//! | GET    | `/api/credit-cards/{cardNumber}` | get |
//! | PUT    | `/api/credit-cards/{cardNumber}` | update |
//! | DELETE | `/api/credit-cards/{cardNumber}` | delete |
//!
//! Invalid input never reaches the upstream.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use ccard_core::format::mask_card_number;
use ccard_core::validate::check_card_number;
use ccard_core::{
    CreateCreditCardRequest, CreditCard, CreditCardListResponse, DeleteCreditCardResponse,
    ListCardsParams, SearchCriteria, UpdateCreditCardRequest, Validate,
};

use crate::auth::ForwardedCredential;
use crate::error::{AppError, ErrorBody};
use crate::extractors::{extract_json, extract_validated_json, extract_validated_query};
use crate::state::AppState;

/// Build the credit card router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/credit-cards", get(list_cards).post(create_card))
        .route("/api/credit-cards/search", get(search_card))
        .route(
            "/api/credit-cards/{card_number}",
            get(get_card).put(update_card).delete(delete_card),
        )
}

/// GET /api/credit-cards: One page of cards, optionally filtered.
#[utoipa::path(
    get,
    path = "/api/credit-cards",
    params(ListCardsParams),
    responses(
        (status = 200, description = "One page of cards", body = CreditCardListResponse),
        (status = 400, description = "Invalid filter or page", body = ErrorBody),
        (status = 502, description = "Upstream card API error", body = ErrorBody),
    ),
    tag = "credit-cards"
)]
pub async fn list_cards(
    State(state): State<AppState>,
    credential: ForwardedCredential,
    query: Result<Query<ListCardsParams>, QueryRejection>,
) -> Result<Json<CreditCardListResponse>, AppError> {
    let params = extract_validated_query(query)?;
    tracing::debug!(page = params.page(), "forwarding card list");
    let page = state
        .upstream(credential.into_inner())
        .list(&params)
        .await?;
    Ok(Json(page))
}

/// GET /api/credit-cards/search: At most one card by account and/or card number.
#[utoipa::path(
    get,
    path = "/api/credit-cards/search",
    params(SearchCriteria),
    responses(
        (status = 200, description = "Matching card", body = CreditCard),
        (status = 400, description = "No criterion or invalid criterion", body = ErrorBody),
        (status = 404, description = "No matching card", body = ErrorBody),
        (status = 502, description = "Upstream card API error", body = ErrorBody),
    ),
    tag = "credit-cards"
)]
pub async fn search_card(
    State(state): State<AppState>,
    credential: ForwardedCredential,
    query: Result<Query<SearchCriteria>, QueryRejection>,
) -> Result<Json<CreditCard>, AppError> {
    let criteria = extract_validated_query(query)?;
    state
        .upstream(credential.into_inner())
        .search(&criteria)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No credit card matches the search criteria".into()))
}

/// GET /api/credit-cards/{cardNumber}: One card.
#[utoipa::path(
    get,
    path = "/api/credit-cards/{card_number}",
    params(("card_number" = String, Path, description = "16-digit card number")),
    responses(
        (status = 200, description = "Card found", body = CreditCard),
        (status = 400, description = "Malformed card number", body = ErrorBody),
        (status = 404, description = "Card not found", body = ErrorBody),
        (status = 502, description = "Upstream card API error", body = ErrorBody),
    ),
    tag = "credit-cards"
)]
pub async fn get_card(
    State(state): State<AppState>,
    credential: ForwardedCredential,
    Path(card_number): Path<String>,
) -> Result<Json<CreditCard>, AppError> {
    check_card_number(&card_number)?;
    state
        .upstream(credential.into_inner())
        .get(&card_number)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Credit card not found".into()))
}

/// PUT /api/credit-cards/{cardNumber}: Partial update.
///
/// A body `cardNumber` that differs from the path is rejected before
/// forwarding. An upstream 409 is returned as `CONFLICT`.
#[utoipa::path(
    put,
    path = "/api/credit-cards/{card_number}",
    params(("card_number" = String, Path, description = "16-digit card number")),
    request_body = UpdateCreditCardRequest,
    responses(
        (status = 200, description = "Card updated", body = CreditCard),
        (status = 400, description = "Validation failed or path/body mismatch", body = ErrorBody),
        (status = 404, description = "Card not found", body = ErrorBody),
        (status = 409, description = "Card changed since it was read", body = ErrorBody),
        (status = 502, description = "Upstream card API error", body = ErrorBody),
    ),
    tag = "credit-cards"
)]
pub async fn update_card(
    State(state): State<AppState>,
    credential: ForwardedCredential,
    Path(card_number): Path<String>,
    body: Result<Json<UpdateCreditCardRequest>, JsonRejection>,
) -> Result<Json<CreditCard>, AppError> {
    check_card_number(&card_number)?;
    let req = extract_json(body)?;
    req.check_path(&card_number)?;
    req.validate()?;

    let card = state
        .upstream(credential.into_inner())
        .update(&card_number, &req)
        .await?;
    tracing::info!(card = %mask_card_number(&card_number), "credit card updated");
    Ok(Json(card))
}

/// POST /api/credit-cards: Create a card.
#[utoipa::path(
    post,
    path = "/api/credit-cards",
    request_body = CreateCreditCardRequest,
    responses(
        (status = 201, description = "Card created", body = CreditCard),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 409, description = "Card number already exists", body = ErrorBody),
        (status = 502, description = "Upstream card API error", body = ErrorBody),
    ),
    tag = "credit-cards"
)]
pub async fn create_card(
    State(state): State<AppState>,
    credential: ForwardedCredential,
    body: Result<Json<CreateCreditCardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreditCard>), AppError> {
    let req = extract_validated_json(body)?;
    let card = state
        .upstream(credential.into_inner())
        .create(&req)
        .await?;
    tracing::info!(card = %mask_card_number(card.card_number.as_str()), "credit card created");
    Ok((StatusCode::CREATED, Json(card)))
}

/// DELETE /api/credit-cards/{cardNumber}: Delete a card.
#[utoipa::path(
    delete,
    path = "/api/credit-cards/{card_number}",
    params(("card_number" = String, Path, description = "16-digit card number")),
    responses(
        (status = 200, description = "Card deleted", body = DeleteCreditCardResponse),
        (status = 400, description = "Malformed card number", body = ErrorBody),
        (status = 404, description = "Card not found", body = ErrorBody),
        (status = 502, description = "Upstream card API error", body = ErrorBody),
    ),
    tag = "credit-cards"
)]
pub async fn delete_card(
    State(state): State<AppState>,
    credential: ForwardedCredential,
    Path(card_number): Path<String>,
) -> Result<Json<DeleteCreditCardResponse>, AppError> {
    check_card_number(&card_number)?;
    let resp = state
        .upstream(credential.into_inner())
        .delete(&card_number)
        .await?;
    tracing::info!(card = %mask_card_number(&card_number), "credit card deleted");
    Ok(Json(resp))
}
