//! Folio REST API
//!
//! This crate provides the Axum-based HTTP API for the portfolio backend:
//! public read endpoints, the contact form, and the bearer-protected
//! admin API.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{cors_layer, create_router};
pub use state::{AppState, MetricsHandle};
