//! Skill and experience management routes

use axum::{
    Extension, Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{delete, post},
};
use folio_auth::AuthAdmin;
use tracing::info;

use crate::error::ApiError;
use crate::routes::types::{CreatedResponse, ExperienceRequest, MessageResponse, SkillRequest};
use crate::state::AppState;

/// POST /api/admin/skills
async fn create_skill(
    Extension(admin): Extension<AuthAdmin>,
    State(state): State<AppState>,
    body: Result<Json<SkillRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(request) = body?;
    request.validate()?;

    let skill = state.db.insert_skill(request.into()).await?;

    info!("{} created skill {}", admin.email, skill.id);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Skill created successfully".to_string(),
            id: skill.id,
        }),
    ))
}

/// DELETE /api/admin/skills/{id}
async fn delete_skill(
    Extension(admin): Extension<AuthAdmin>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.db.delete_skill(&id).await? {
        return Err(ApiError::NotFound(format!("Skill: {}", id)));
    }

    info!("{} deleted skill {}", admin.email, id);
    Ok(Json(MessageResponse::new("Skill deleted successfully")))
}

/// POST /api/admin/experience
async fn create_experience(
    Extension(admin): Extension<AuthAdmin>,
    State(state): State<AppState>,
    body: Result<Json<ExperienceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(request) = body?;
    request.validate()?;

    let exp = state.db.insert_experience(request.into()).await?;

    info!("{} created experience {}", admin.email, exp.id);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Experience created successfully".to_string(),
            id: exp.id,
        }),
    ))
}

/// DELETE /api/admin/experience/{id}
async fn delete_experience(
    Extension(admin): Extension<AuthAdmin>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.db.delete_experience(&id).await? {
        return Err(ApiError::NotFound(format!("Experience: {}", id)));
    }

    info!("{} deleted experience {}", admin.email, id);
    Ok(Json(MessageResponse::new("Experience deleted successfully")))
}

/// Create skill and experience routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/skills", post(create_skill))
        .route("/admin/skills/{id}", delete(delete_skill))
        .route("/admin/experience", post(create_experience))
        .route("/admin/experience/{id}", delete(delete_experience))
}
