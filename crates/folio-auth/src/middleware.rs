//! Authentication middleware for Axum

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::error::AuthError;
use crate::jwt::JwtManager;

/// Authenticated administrator, inserted into request extensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthAdmin {
    pub email: String,
}

/// Extract bearer token from authorization header
///
/// The scheme is matched case-insensitively.
pub fn extract_bearer_token(header: &str) -> Result<&str, AuthError> {
    let (scheme, token) = header
        .split_once(' ')
        .ok_or(AuthError::InvalidAuthHeader)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidAuthHeader);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }
    Ok(token)
}

/// Middleware requiring a valid administrator token
///
/// Rejects the request with a uniform 401 unless the Authorization header
/// carries a token that passes verification. On success the subject is
/// available to handlers as an [`AuthAdmin`] extension.
pub async fn require_admin(
    State(jwt_manager): State<Arc<JwtManager>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let result = authenticate(&jwt_manager, &request);
    let admin = match result {
        Ok(admin) => admin,
        Err(e) => {
            metrics::counter!("folio_auth_rejections_total").increment(1);
            return Err(e);
        }
    };

    debug!("Authenticated admin: {}", admin.email);

    request.extensions_mut().insert(admin);
    Ok(next.run(request).await)
}

fn authenticate(jwt_manager: &JwtManager, request: &Request) -> Result<AuthAdmin, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = extract_bearer_token(header)?;
    let email = jwt_manager.verify(token)?;
    Ok(AuthAdmin { email })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Extension, Router,
        body::{Body, to_bytes},
        http::{StatusCode, header::WWW_AUTHENTICATE},
        middleware::from_fn_with_state,
        routing::get,
    };
    use chrono::{Duration, Utc};
    use tower::ServiceExt;

    fn app(jwt: Arc<JwtManager>) -> Router {
        Router::new()
            .route(
                "/protected",
                get(|Extension(admin): Extension<AuthAdmin>| async move { admin.email }),
            )
            .route_layer(from_fn_with_state(jwt, require_admin))
    }

    async fn call(jwt: Arc<JwtManager>, auth: Option<String>) -> (StatusCode, String) {
        let mut builder = Request::builder().uri("/protected");
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        let response = app(jwt)
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            assert_eq!(response.headers().get(WWW_AUTHENTICATE).unwrap(), "Bearer");
        }
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert_eq!(extract_bearer_token("bearer abc.def").unwrap(), "abc.def");
        assert!(extract_bearer_token("Basic dXNlcjpwYXNz").is_err());
        assert!(extract_bearer_token("Bearer").is_err());
        assert!(extract_bearer_token("Bearer   ").is_err());
        assert!(extract_bearer_token("").is_err());
    }

    #[tokio::test]
    async fn test_valid_token_passes_subject_through() {
        let jwt = Arc::new(JwtManager::new("middleware-secret"));
        let issued = jwt.issue("admin@example.com", Some(Duration::minutes(30))).unwrap();

        let (status, body) = call(jwt, Some(format!("Bearer {}", issued.token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "admin@example.com");
    }

    #[tokio::test]
    async fn test_rejections_are_uniform() {
        let jwt = Arc::new(JwtManager::new("middleware-secret"));
        let expired = jwt
            .issue_at(
                "admin@example.com",
                Some(Duration::minutes(30)),
                Utc::now() - Duration::hours(1),
            )
            .unwrap();
        let foreign = JwtManager::new("other-secret")
            .issue("admin@example.com", None)
            .unwrap();

        let missing = call(jwt.clone(), None).await;
        assert_eq!(missing.0, StatusCode::UNAUTHORIZED);

        for header in [
            format!("Bearer {}", expired.token),
            format!("Bearer {}", foreign.token),
            "Bearer garbage".to_string(),
            format!("Token {}", expired.token),
        ] {
            assert_eq!(call(jwt.clone(), Some(header)).await, missing);
        }
    }
}
