//! JWT token management
//!
//! Tokens are HS256-signed and stateless: validity depends only on the
//! signature, the `exp` claim and a non-empty `sub` claim.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthError;

/// Lifetime of tokens issued by the login flow
pub const LOGIN_TOKEN_TTL_MINUTES: i64 = 30;
/// Lifetime used when a caller does not specify one
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 15;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (administrator email)
    #[serde(default)]
    pub sub: String,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// A freshly signed token together with its claim timestamps
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub subject: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Seconds until expiry, measured from issuance
    pub fn expires_in(&self) -> i64 {
        (self.expires_at - self.issued_at).num_seconds()
    }
}

/// JWT manager for token generation and validation
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtManager {
    /// Create a new JWT manager
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an explicit clock in `verify_at`
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a token for `subject`, valid for `ttl` (15 minutes if unspecified)
    pub fn issue(&self, subject: &str, ttl: Option<Duration>) -> Result<IssuedToken, AuthError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(
        &self,
        subject: &str,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let ttl = ttl.unwrap_or_else(|| Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES));
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Internal(format!("token ttl out of range: {}", ttl)))?;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        debug!("Issuing token expiring at {}", expires_at.to_rfc3339());

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(IssuedToken {
            token,
            subject: claims.sub,
            issued_at: now,
            expires_at,
        })
    }

    /// Validate a token and return its subject
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Validate a token against the clock value `now`
    ///
    /// Checks run in a fixed order: signature, then expiry, then subject.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                        AuthError::MalformedClaims
                    }
                    ErrorKind::ExpiredSignature => AuthError::Expired,
                    _ => AuthError::InvalidSignature,
                }
            })?;

        let claims = token_data.claims;

        if now.timestamp() >= claims.exp {
            return Err(AuthError::Expired);
        }

        if claims.sub.trim().is_empty() {
            return Err(AuthError::MalformedClaims);
        }

        Ok(claims.sub)
    }
}
