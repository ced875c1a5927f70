//! Project management routes

use axum::{
    Extension, Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{post, put},
};
use folio_auth::AuthAdmin;
use tracing::info;

use crate::error::ApiError;
use crate::routes::types::{CreatedResponse, MessageResponse, ProjectRequest};
use crate::state::AppState;

/// POST /api/admin/projects
async fn create_project(
    Extension(admin): Extension<AuthAdmin>,
    State(state): State<AppState>,
    body: Result<Json<ProjectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(request) = body?;
    request.validate()?;

    let project = state.db.insert_project(request.into()).await?;

    info!("{} created project {}", admin.email, project.id);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Project created successfully".to_string(),
            id: project.id,
        }),
    ))
}

/// PUT /api/admin/projects/{id}
async fn update_project(
    Extension(admin): Extension<AuthAdmin>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ProjectRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = body?;
    request.validate()?;

    if !state.db.update_project(&id, request.into()).await? {
        return Err(ApiError::NotFound(format!("Project: {}", id)));
    }

    info!("{} updated project {}", admin.email, id);
    Ok(Json(MessageResponse::new("Project updated successfully")))
}

/// DELETE /api/admin/projects/{id}
async fn delete_project(
    Extension(admin): Extension<AuthAdmin>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.db.delete_project(&id).await? {
        return Err(ApiError::NotFound(format!("Project: {}", id)));
    }

    info!("{} deleted project {}", admin.email, id);
    Ok(Json(MessageResponse::new("Project deleted successfully")))
}

/// Create project routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/projects", post(create_project))
        .route(
            "/admin/projects/{id}",
            put(update_project).delete(delete_project),
        )
}
