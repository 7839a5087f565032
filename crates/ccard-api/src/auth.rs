//! # Caller Credential Forwarding
//!
//! The service does not authenticate callers itself. It reads the caller's
//! `Authorization: Bearer <token>` header and hands the token to the upstream
//! client unchanged; the upstream decides whether the caller may proceed.
//!
//! An absent header forwards no credential. A header that is present but not
//! a bearer credential is rejected with 401 before anything is forwarded.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::{Authorization, Bearer};
use axum_extra::TypedHeader;
use ccard_client::BearerToken;

use crate::error::AppError;

/// The caller's bearer token, if one was sent.
#[derive(Debug, Clone, Default)]
pub struct ForwardedCredential(pub Option<BearerToken>);

impl ForwardedCredential {
    /// Consume into the token.
    pub fn into_inner(self) -> Option<BearerToken> {
        self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ForwardedCredential {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(bearer))) => {
                Ok(Self(Some(BearerToken::new(bearer.token()))))
            }
            Err(rejection) if rejection.is_missing() => Ok(Self(None)),
            Err(_) => Err(AppError::Unauthorized(
                "Authorization header must be a bearer token".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Request};

    async fn extract(value: Option<&str>) -> Result<ForwardedCredential, AppError> {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        ForwardedCredential::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn bearer_header_is_forwarded() {
        let cred = extract(Some("Bearer abc123")).await.unwrap();
        assert_eq!(cred.into_inner().unwrap().expose(), "abc123");
    }

    #[tokio::test]
    async fn missing_header_forwards_nothing() {
        let cred = extract(None).await.unwrap();
        assert!(cred.into_inner().is_none());
    }

    #[tokio::test]
    async fn basic_auth_is_rejected() {
        let err = extract(Some("Basic dXNlcjpwYXNz")).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
