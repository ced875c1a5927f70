//! Admin login and identity routes

use axum::{
    Extension, Form, Json, Router,
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    routing::{get, post},
};
use folio_auth::{AuthAdmin, AuthError};
use tracing::debug;

use crate::error::ApiError;
use crate::routes::types::{LoginForm, MeResponse, TokenResponse};
use crate::state::AppState;

/// Maximum accepted password length; longer input cannot match and is
/// rejected before hashing
const MAX_PASSWORD_LENGTH: usize = 256;
/// Maximum accepted email length
const MAX_EMAIL_LENGTH: usize = 254;

/// Count a login rejected before the credential check
fn rejected_login() -> AuthError {
    metrics::counter!("folio_logins_total", "outcome" => "failure").increment(1);
    AuthError::InvalidCredentials
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| {
            ct.trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}

/// Read `username` and `password` from a urlencoded or multipart form
///
/// A body that cannot be read counts as a failed login.
async fn read_login_form(request: Request) -> Result<LoginForm, AuthError> {
    if !is_multipart(&request) {
        let Form(form) = Form::<LoginForm>::from_request(request, &())
            .await
            .map_err(|e| {
                debug!("Unreadable login form: {}", e.body_text());
                rejected_login()
            })?;
        return Ok(form);
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|_| rejected_login())?;

    let mut username = None;
    let mut password = None;
    while let Some(field) = multipart.next_field().await.map_err(|_| rejected_login())? {
        let slot = match field.name() {
            Some("username") => &mut username,
            Some("password") => &mut password,
            _ => continue,
        };
        *slot = Some(field.text().await.map_err(|_| rejected_login())?);
    }

    match (username, password) {
        (Some(username), Some(password)) => Ok(LoginForm { username, password }),
        _ => {
            debug!("Multipart login form is missing a field");
            Err(rejected_login())
        }
    }
}

/// POST /api/admin/login
async fn login(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<TokenResponse>, ApiError> {
    let form = read_login_form(request).await?;

    if form.username.len() > MAX_EMAIL_LENGTH || form.password.len() > MAX_PASSWORD_LENGTH {
        return Err(rejected_login().into());
    }

    debug!("Login attempt");

    let issued = folio_auth::login(
        &state.db,
        &state.jwt,
        form.username.trim(),
        &form.password,
        state.login_ttl,
    )
    .await?;

    Ok(Json(TokenResponse {
        expires_in: issued.expires_in(),
        access_token: issued.token,
        token_type: "bearer".to_string(),
    }))
}

/// GET /api/admin/me
async fn me(Extension(admin): Extension<AuthAdmin>) -> Json<MeResponse> {
    Json(MeResponse { email: admin.email })
}

/// Login route, reachable without a token
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/admin/login", post(login))
}

/// Identity route, mounted behind the admin guard
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/admin/me", get(me))
}
