//! Folio Authentication
//!
//! This crate provides the single-administrator authentication flow:
//! Argon2 password hashing, HS256 JWT issuance and verification, the
//! login orchestration, and an Axum middleware guarding admin routes.

pub mod error;
pub mod jwt;
pub mod login;
pub mod middleware;
pub mod password;

pub use error::AuthError;
pub use jwt::{Claims, IssuedToken, JwtManager, DEFAULT_TOKEN_TTL_MINUTES, LOGIN_TOKEN_TTL_MINUTES};
pub use login::{ensure_admin, login};
pub use middleware::{extract_bearer_token, require_admin, AuthAdmin};
pub use password::{hash_password, verify_password};
