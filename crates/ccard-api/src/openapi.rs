//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the card API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Credit Card Management API",
        version = "0.1.0",
        description = "List, search, view, edit, create and delete credit cards. Requests are validated and forwarded to the upstream card service with the caller's bearer token.",
        license(name = "BUSL-1.1")
    ),
    paths(
        crate::routes::credit_cards::list_cards,
        crate::routes::credit_cards::search_card,
        crate::routes::credit_cards::get_card,
        crate::routes::credit_cards::update_card,
        crate::routes::credit_cards::create_card,
        crate::routes::credit_cards::delete_card,
    ),
    components(schemas(
        ccard_core::CreditCard,
        ccard_core::CreditCardListItem,
        ccard_core::CreditCardListResponse,
        ccard_core::CreateCreditCardRequest,
        ccard_core::UpdateCreditCardRequest,
        ccard_core::DeleteCreditCardResponse,
        ccard_core::CardNumber,
        ccard_core::AccountId,
        ccard_core::ActiveStatus,
        ccard_core::ExpirationDate,
        ccard_core::FieldErrors,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "credit-cards", description = "Credit card management"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
