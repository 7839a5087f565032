//! Route definitions for the card API stub.
//!
//! Serves the upstream contract that `ccard-client` calls. Errors use the
//! same `{status, code, message, errors?, timestamp}` envelope as the BFF so
//! the client's error parsing is exercised end to end.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use ccard_core::{
    validate::check_card_number, CreateCreditCardRequest, DeleteCreditCardResponse, FieldErrors,
    ListCardsParams, SearchCriteria, UpdateCreditCardRequest, Validate, ValidationError,
};
use chrono::Utc;
use serde_json::json;

use crate::store::{CardStore, InsertError, UpdateError};

/// Build the complete stub router.
pub fn router(store: CardStore) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/credit-cards", get(list_cards).post(create_card))
        .route("/api/credit-cards/search", get(search_card))
        .route(
            "/api/credit-cards/{card_number}",
            get(get_card).put(update_card).delete(delete_card),
        )
        .fallback(not_found_route)
        .with_state(store)
}

// ── Error envelope ──────────────────────────────────────────────────

fn error(status: StatusCode, code: &str, message: &str, errors: Option<FieldErrors>) -> Response {
    let mut body = json!({
        "status": status.as_u16(),
        "code": code,
        "message": message,
        "timestamp": Utc::now().to_rfc3339(),
    });
    if let Some(errors) = errors {
        body["errors"] = json!(errors);
    }
    (status, Json(body)).into_response()
}

fn bad_request(err: ValidationError) -> Response {
    let message = err.to_string();
    match err.into_field_errors() {
        Some(fields) => error(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Validation failed",
            Some(fields),
        ),
        None => error(StatusCode::BAD_REQUEST, "BAD_REQUEST", &message, None),
    }
}

fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "NOT_FOUND", "Credit card not found", None)
}

fn malformed(message: String) -> Response {
    error(StatusCode::BAD_REQUEST, "BAD_REQUEST", &message, None)
}

// ── Health ──────────────────────────────────────────────────────────

async fn health() -> StatusCode {
    StatusCode::OK
}

// ── Credit cards ────────────────────────────────────────────────────

async fn list_cards(
    State(store): State<CardStore>,
    query: Result<Query<ListCardsParams>, QueryRejection>,
) -> Response {
    let Query(params) = match query {
        Ok(q) => q,
        Err(rejection) => return malformed(rejection.body_text()),
    };
    if let Err(err) = params.validate() {
        return bad_request(err);
    }
    Json(store.list(&params)).into_response()
}

async fn search_card(
    State(store): State<CardStore>,
    query: Result<Query<SearchCriteria>, QueryRejection>,
) -> Response {
    let Query(criteria) = match query {
        Ok(q) => q,
        Err(rejection) => return malformed(rejection.body_text()),
    };
    if let Err(err) = criteria.validate() {
        return bad_request(err);
    }
    match store.search(&criteria) {
        Some(card) => Json(card).into_response(),
        None => not_found(),
    }
}

async fn get_card(State(store): State<CardStore>, Path(card_number): Path<String>) -> Response {
    if let Err(err) = check_card_number(&card_number) {
        return bad_request(err);
    }
    match store.get(&card_number) {
        Some(card) => Json(card).into_response(),
        None => not_found(),
    }
}

async fn create_card(
    State(store): State<CardStore>,
    body: Result<Json<CreateCreditCardRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rejection) => return malformed(rejection.body_text()),
    };
    let new_card = match req.into_new_card() {
        Ok(card) => card,
        Err(err) => return bad_request(err),
    };
    match store.insert(new_card) {
        Ok(card) => {
            tracing::debug!(card = ?card.card_number, "stub card created");
            (StatusCode::CREATED, Json(card)).into_response()
        }
        Err(InsertError::Duplicate) => error(
            StatusCode::CONFLICT,
            "CONFLICT",
            "A credit card with this number already exists",
            None,
        ),
    }
}

async fn update_card(
    State(store): State<CardStore>,
    Path(card_number): Path<String>,
    body: Result<Json<UpdateCreditCardRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rejection) => return malformed(rejection.body_text()),
    };
    if let Err(err) = check_card_number(&card_number)
        .and_then(|()| req.check_path(&card_number))
        .and_then(|()| req.validate())
    {
        return bad_request(err);
    }
    match store.update(&card_number, &req) {
        Ok(card) => Json(card).into_response(),
        Err(UpdateError::NotFound) => not_found(),
        Err(UpdateError::AccountMismatch) => error(
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            "Account ID mismatch. Cannot update card for different account.",
            None,
        ),
    }
}

async fn delete_card(State(store): State<CardStore>, Path(card_number): Path<String>) -> Response {
    if let Err(err) = check_card_number(&card_number) {
        return bad_request(err);
    }
    if store.remove(&card_number) {
        Json(DeleteCreditCardResponse::deleted()).into_response()
    } else {
        not_found()
    }
}

async fn not_found_route() -> Response {
    error(StatusCode::NOT_FOUND, "NOT_FOUND", "No such route", None)
}
