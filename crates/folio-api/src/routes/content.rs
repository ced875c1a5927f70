//! Public content routes
//!
//! Read-only listings for the portfolio front end plus the contact form.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, post},
};
use folio_db::{BlogPost, Experience, Project, Skill};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::routes::types::{ContactRequest, MessageResponse};
use crate::state::AppState;

/// GET /api/projects - featured first, then newest
async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(state.db.list_projects().await?))
}

/// GET /api/projects/{id}
async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    state
        .db
        .get_project(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Project: {}", id)))
}

/// GET /api/blog/{id} - drafts are reported as missing
async fn get_blog_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    state
        .db
        .get_blog_post(&id)
        .await?
        .filter(|post| post.published)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Blog post: {}", id)))
}

/// GET /api/blog - published posts only
async fn list_blog_posts(State(state): State<AppState>) -> Result<Json<Vec<BlogPost>>, ApiError> {
    Ok(Json(state.db.list_blog_posts(true).await?))
}

/// GET /api/skills
async fn list_skills(State(state): State<AppState>) -> Result<Json<Vec<Skill>>, ApiError> {
    Ok(Json(state.db.list_skills().await?))
}

/// GET /api/experience
async fn list_experience(
    State(state): State<AppState>,
) -> Result<Json<Vec<Experience>>, ApiError> {
    Ok(Json(state.db.list_experiences().await?))
}

/// POST /api/contact
///
/// The message is stored before notifying; a failed notification is logged
/// and does not fail the submission.
async fn submit_contact(
    State(state): State<AppState>,
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = body?;
    request.validate()?;

    let contact = state.db.insert_contact(request.into()).await?;
    metrics::counter!("folio_contact_messages_total").increment(1);
    info!("Stored contact message {}", contact.id);

    if let Err(e) = state.notifier.notify_contact(&contact).await {
        warn!("Failed to send notification for contact {}: {}", contact.id, e);
    }

    Ok(Json(MessageResponse::new("Contact message sent successfully")))
}

/// Create public content routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects))
        .route("/projects/{id}", get(get_project))
        .route("/blog", get(list_blog_posts))
        .route("/blog/{id}", get(get_blog_post))
        .route("/skills", get(list_skills))
        .route("/experience", get(list_experience))
        .route("/contact", post(submit_contact))
}
