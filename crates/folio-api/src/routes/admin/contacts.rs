//! Contact inbox routes

use axum::{Json, Router, extract::State, routing::get};
use folio_db::ContactMessage;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/admin/contacts
async fn list_contacts(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessage>>, ApiError> {
    Ok(Json(state.db.list_contacts().await?))
}

/// Create contact inbox routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/admin/contacts", get(list_contacts))
}
