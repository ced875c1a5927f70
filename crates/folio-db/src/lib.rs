//! Folio Database Layer
//!
//! This crate provides the persistence layer for the portfolio backend,
//! using SQLite via sqlx. It stores the administrator credential record
//! and the public content collections.

pub mod error;
pub mod models;
pub mod repository;
pub mod utils;

pub use error::DbError;
pub use models::*;
pub use repository::Database;
