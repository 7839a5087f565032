//! Card API client error types.

use ccard_core::{FieldErrors, ValidationError};
use serde::Deserialize;

/// Errors from card API calls.
#[derive(Debug, thiserror::Error)]
pub enum CardClientError {
    /// Input rejected before any request was sent.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// `previous_page` was asked for a page before the first.
    #[error("already on the first page")]
    AlreadyOnFirstPage,

    /// The API rejected the request (400).
    #[error("{endpoint} rejected the request: {message}")]
    BadRequest {
        endpoint: String,
        message: String,
        errors: Option<FieldErrors>,
    },

    /// Missing or invalid credential (401).
    #[error("{endpoint} requires authentication")]
    Unauthorized { endpoint: String },

    /// Credential lacks permission (403).
    #[error("{endpoint} denied access")]
    Forbidden { endpoint: String },

    /// The addressed card does not exist (404).
    #[error("{endpoint} found no matching card")]
    NotFound { endpoint: String },

    /// The card changed since it was read (409). Re-fetch before writing again.
    #[error("{endpoint} reported a conflicting change: {message}")]
    Conflict { endpoint: String, message: String },

    /// Any other non-2xx status.
    #[error("card API {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl CardClientError {
    /// `true` for an optimistic-concurrency conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// `true` when the addressed card does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Field messages from a client-side or server-side validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(ValidationError::Fields(fields)) => Some(fields),
            Self::BadRequest { errors, .. } => errors.as_ref(),
            _ => None,
        }
    }

    /// Map a non-2xx status and its body to an error.
    pub(crate) fn from_status(endpoint: String, status: u16, body: String) -> Self {
        let parsed = ErrorBody::parse(&body);
        match status {
            400 => Self::BadRequest {
                endpoint,
                message: parsed.message.unwrap_or_else(|| "Bad request".to_string()),
                errors: parsed.errors,
            },
            401 => Self::Unauthorized { endpoint },
            403 => Self::Forbidden { endpoint },
            404 => Self::NotFound { endpoint },
            409 => Self::Conflict {
                endpoint,
                message: parsed
                    .message
                    .unwrap_or_else(|| "The card was modified by another user".to_string()),
            },
            _ => Self::ApiError {
                endpoint,
                status,
                body,
            },
        }
    }
}

/// Error body as sent by the card API.
///
/// Two envelopes are in circulation: `{message, errors}` and `{error}`.
/// Both are read; `errors` may be a field map or a list of strings.
#[derive(Debug, Default, Deserialize)]
struct RawErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    errors: Option<serde_json::Value>,
}

/// Normalised upstream error body.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ErrorBody {
    pub(crate) message: Option<String>,
    pub(crate) errors: Option<FieldErrors>,
}

impl ErrorBody {
    pub(crate) fn parse(body: &str) -> Self {
        let raw: RawErrorBody = serde_json::from_str(body).unwrap_or_default();

        let errors = match &raw.errors {
            Some(serde_json::Value::Object(map)) => {
                let mut fields = FieldErrors::new();
                for (field, message) in map {
                    match message {
                        serde_json::Value::String(s) => fields.insert(field, s.clone()),
                        other => fields.insert(field, other.to_string()),
                    }
                }
                (!fields.is_empty()).then_some(fields)
            }
            _ => None,
        };

        let list_message = match &raw.errors {
            Some(serde_json::Value::Array(items)) => {
                let joined = items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                (!joined.is_empty()).then_some(joined)
            }
            _ => None,
        };

        let error_message = match raw.error {
            Some(serde_json::Value::String(s)) => Some(s),
            _ => None,
        };

        Self {
            message: raw.message.or(error_message).or(list_message),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_message_and_field_map() {
        let body = ErrorBody::parse(
            r#"{"status":400,"code":"VALIDATION_ERROR","message":"Validation failed","errors":{"cardNumber":"Card number must be exactly 16 digits"}}"#,
        );
        assert_eq!(body.message.as_deref(), Some("Validation failed"));
        let errors = body.errors.unwrap();
        assert_eq!(
            errors.get("cardNumber"),
            Some("Card number must be exactly 16 digits")
        );
    }

    #[test]
    fn parses_error_envelope() {
        let body = ErrorBody::parse(r#"{"error":"Card not found"}"#);
        assert_eq!(body.message.as_deref(), Some("Card not found"));
        assert!(body.errors.is_none());
    }

    #[test]
    fn parses_error_list() {
        let body = ErrorBody::parse(r#"{"errors":["a","b"]}"#);
        assert_eq!(body.message.as_deref(), Some("a; b"));
    }

    #[test]
    fn tolerates_non_json() {
        assert_eq!(ErrorBody::parse("<html>oops</html>"), ErrorBody::default());
    }

    #[test]
    fn maps_statuses() {
        let conflict = CardClientError::from_status("PUT x".into(), 409, String::new());
        assert!(conflict.is_conflict());
        let missing = CardClientError::from_status("GET x".into(), 404, String::new());
        assert!(missing.is_not_found());
        let other = CardClientError::from_status("GET x".into(), 503, "down".into());
        assert!(matches!(
            other,
            CardClientError::ApiError { status: 503, .. }
        ));
    }
}
