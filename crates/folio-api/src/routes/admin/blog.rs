//! Blog management routes

use axum::{
    Extension, Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, put},
};
use folio_auth::AuthAdmin;
use folio_db::BlogPost;
use tracing::info;

use crate::error::ApiError;
use crate::routes::types::{BlogPostRequest, CreatedResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/admin/blog (drafts included)
async fn list_all_posts(State(state): State<AppState>) -> Result<Json<Vec<BlogPost>>, ApiError> {
    Ok(Json(state.db.list_blog_posts(false).await?))
}

/// POST /api/admin/blog
async fn create_post(
    Extension(admin): Extension<AuthAdmin>,
    State(state): State<AppState>,
    body: Result<Json<BlogPostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(request) = body?;
    request.validate()?;

    let post = state.db.insert_blog_post(request.into()).await?;

    info!("{} created blog post {}", admin.email, post.id);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Blog post created successfully".to_string(),
            id: post.id,
        }),
    ))
}

/// PUT /api/admin/blog/{id}
async fn update_post(
    Extension(admin): Extension<AuthAdmin>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<BlogPostRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = body?;
    request.validate()?;

    if !state.db.update_blog_post(&id, request.into()).await? {
        return Err(ApiError::NotFound(format!("Blog post: {}", id)));
    }

    info!("{} updated blog post {}", admin.email, id);
    Ok(Json(MessageResponse::new("Blog post updated successfully")))
}

/// DELETE /api/admin/blog/{id}
async fn delete_post(
    Extension(admin): Extension<AuthAdmin>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.db.delete_blog_post(&id).await? {
        return Err(ApiError::NotFound(format!("Blog post: {}", id)));
    }

    info!("{} deleted blog post {}", admin.email, id);
    Ok(Json(MessageResponse::new("Blog post deleted successfully")))
}

/// Create blog routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/blog", get(list_all_posts).post(create_post))
        .route("/admin/blog/{id}", put(update_post).delete(delete_post))
}
