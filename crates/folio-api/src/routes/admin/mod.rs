//! Admin API routes
//!
//! Everything here except the login route sits behind the bearer-token
//! guard from `folio_auth`.

pub mod auth;
pub mod blog;
pub mod contacts;
pub mod projects;
pub mod skills;

use axum::{Router, middleware};
use folio_auth::{JwtManager, require_admin};
use std::sync::Arc;

use crate::state::AppState;

/// Create admin API routes
pub fn routes(jwt: Arc<JwtManager>) -> Router<AppState> {
    let protected = Router::new()
        .merge(auth::protected_routes())
        .merge(projects::routes())
        .merge(blog::routes())
        .merge(skills::routes())
        .merge(contacts::routes())
        .route_layer(middleware::from_fn_with_state(jwt, require_admin));

    Router::new().merge(auth::public_routes()).merge(protected)
}
