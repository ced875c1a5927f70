//! Authentication error types
//!
//! Every authentication failure renders as the same 401 response for its
//! category. The variant is only visible in server-side logs.

use axum::http::header::WWW_AUTHENTICATE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// Body detail returned for any failed login
pub const LOGIN_FAILED_DETAIL: &str = "Incorrect email or password";
/// Body detail returned for any rejected bearer token
pub const UNAUTHENTICATED_DETAIL: &str = "Could not validate credentials";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Malformed token claims")]
    MalformedClaims,

    #[error("Missing authorization header")]
    MissingAuthHeader,

    #[error("Invalid authorization header format")]
    InvalidAuthHeader,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token encoding error: {0}")]
    TokenEncoding(#[from] jsonwebtoken::errors::Error),

    #[error("Database error: {0}")]
    Database(#[from] folio_db::DbError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Whether this error means the caller failed to authenticate
    ///
    /// Everything else is a server-side failure and maps to a 5xx.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials
                | AuthError::InvalidSignature
                | AuthError::Expired
                | AuthError::MalformedClaims
                | AuthError::MissingAuthHeader
                | AuthError::InvalidAuthHeader
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if !self.is_unauthenticated() {
            error!("Authentication backend failure: {}", self);
            let body = axum::Json(json!({
                "detail": "Internal server error"
            }));
            return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
        }

        debug!("Rejecting request: {}", self);

        let detail = match self {
            AuthError::InvalidCredentials => LOGIN_FAILED_DETAIL,
            _ => UNAUTHENTICATED_DETAIL,
        };

        let body = axum::Json(json!({
            "detail": detail
        }));

        (
            StatusCode::UNAUTHORIZED,
            [(WWW_AUTHENTICATE, "Bearer")],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: AuthError) -> (StatusCode, Option<String>, String) {
        let response = err.into_response();
        let status = response.status();
        let header = response
            .headers()
            .get(WWW_AUTHENTICATE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, header, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_token_failures_are_indistinguishable() {
        let expected = render(AuthError::InvalidSignature).await;
        assert_eq!(expected.0, StatusCode::UNAUTHORIZED);
        assert_eq!(expected.1.as_deref(), Some("Bearer"));

        for err in [
            AuthError::Expired,
            AuthError::MalformedClaims,
            AuthError::MissingAuthHeader,
            AuthError::InvalidAuthHeader,
        ] {
            assert_eq!(render(err).await, expected);
        }
    }

    #[tokio::test]
    async fn test_login_failure_response() {
        let (status, header, body) = render(AuthError::InvalidCredentials).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(header.as_deref(), Some("Bearer"));
        assert!(body.contains(LOGIN_FAILED_DETAIL));
    }

    #[tokio::test]
    async fn test_backend_failure_is_not_401() {
        let (status, header, body) = render(AuthError::Internal("join error".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(header.is_none());
        assert!(!body.contains("join error"));
    }
}
