//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every failure leaves the service in one envelope:
//!
//! ```json
//! { "status": 400, "code": "VALIDATION_ERROR", "message": "Validation failed",
//!   "errors": { "cardNumber": "Card number must be exactly 16 digits" },
//!   "timestamp": "2026-01-01T00:00:00Z" }
//! ```
//!
//! `errors` appears only for field-level validation failures. 500 and 502
//! responses carry a generic message; the detail is logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ccard_client::CardClientError;
use ccard_core::{FieldErrors, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Per-field messages, present only for field validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    /// When the error was produced.
    pub timestamp: DateTime<Utc>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed request or request-shape rule violated (400).
    #[error("{0}")]
    BadRequest(String),

    /// One or more fields failed validation (400).
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// Missing or rejected credential (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Credential lacks permission (403).
    #[error("{0}")]
    Forbidden(String),

    /// Resource not found (404).
    #[error("{0}")]
    NotFound(String),

    /// The card changed since the caller read it (409).
    #[error("{0}")]
    Conflict(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),

    /// Upstream failed or answered unexpectedly (502). Message is logged only.
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
        }
    }

    /// The envelope this error renders as.
    pub fn body(&self) -> ErrorBody {
        let (status, code) = self.status_and_code();
        let message = match self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::Upstream(_) => "The card service is unavailable".to_string(),
            other => other.to_string(),
        };
        let errors = match self {
            Self::Validation(fields) => Some(fields.clone()),
            _ => None,
        };
        ErrorBody {
            status: status.as_u16(),
            code: code.to_string(),
            message,
            errors,
            timestamp: Utc::now(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Upstream(_) => tracing::error!(error = %self, "upstream card service failure"),
            _ => tracing::debug!(error = %self, status = status.as_u16(), "request rejected"),
        }

        (status, Json(self.body())).into_response()
    }
}

/// Field failures become `VALIDATION_ERROR`; request-shape failures `BAD_REQUEST`.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let message = err.to_string();
        match err.into_field_errors() {
            Some(fields) => Self::Validation(fields),
            None => Self::BadRequest(message),
        }
    }
}

/// Map typed upstream outcomes onto the envelope.
impl From<CardClientError> for AppError {
    fn from(err: CardClientError) -> Self {
        match err {
            CardClientError::Validation(v) => v.into(),
            CardClientError::AlreadyOnFirstPage => {
                Self::BadRequest("Already on the first page".to_string())
            }
            CardClientError::BadRequest {
                errors: Some(fields),
                ..
            } => Self::Validation(fields),
            CardClientError::BadRequest { message, .. } => Self::BadRequest(message),
            CardClientError::Unauthorized { .. } => {
                Self::Unauthorized("Authentication required".to_string())
            }
            CardClientError::Forbidden { .. } => {
                Self::Forbidden("Access to this credit card is not permitted".to_string())
            }
            CardClientError::NotFound { .. } => Self::NotFound("Credit card not found".to_string()),
            CardClientError::Conflict { message, .. } => Self::Conflict(message),
            CardClientError::Config(e) => Self::Internal(e.to_string()),
            other @ (CardClientError::ApiError { .. }
            | CardClientError::Http { .. }
            | CardClientError::Deserialization { .. }) => Self::Upstream(other.to_string()),
        }
    }
}
