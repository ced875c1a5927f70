//! Administrator seeding and the login flow

use chrono::Duration;
use folio_db::{Database, NewAdminUser};
use std::sync::LazyLock;
use tracing::{debug, info, warn};

use crate::error::AuthError;
use crate::jwt::{IssuedToken, JwtManager};
use crate::password::{hash_password, verify_password};

/// Hash verified when the submitted email is unknown, so that both
/// failure paths spend the same Argon2 work.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("folio-dummy-password").unwrap_or_default());

/// Create the administrator record unless one already exists
///
/// Returns `true` when a new record was written. An existing administrator
/// is never modified, even if its email differs from `email`.
pub async fn ensure_admin(db: &Database, email: &str, password: &str) -> Result<bool, AuthError> {
    if db.get_admin_by_email(email).await?.is_some() {
        debug!("Administrator {} already present", email);
        return Ok(false);
    }

    if db.has_admin().await? {
        warn!(
            "An administrator with a different email already exists; ignoring configured admin {}",
            email
        );
        return Ok(false);
    }

    let password = password.to_string();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))??;

    db.insert_admin(NewAdminUser {
        email: email.to_string(),
        password_hash,
    })
    .await?;

    info!("Created administrator {}", email);
    Ok(true)
}

/// Authenticate the administrator and issue an access token
///
/// Unknown emails and wrong passwords both yield
/// [`AuthError::InvalidCredentials`].
pub async fn login(
    db: &Database,
    jwt: &JwtManager,
    email: &str,
    password: &str,
    ttl: Duration,
) -> Result<IssuedToken, AuthError> {
    let admin = db.get_admin_by_email(email).await?;

    let hash_to_verify = match &admin {
        Some(a) => a.password_hash.clone(),
        None => DUMMY_HASH.clone(),
    };

    let password = password.to_string();
    let password_valid =
        tokio::task::spawn_blocking(move || verify_password(&password, &hash_to_verify))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

    let admin = match (admin, password_valid) {
        (Some(a), true) => a,
        _ => {
            metrics::counter!("folio_logins_total", "outcome" => "failure").increment(1);
            return Err(AuthError::InvalidCredentials);
        }
    };

    let issued = jwt.issue(&admin.email, Some(ttl))?;

    metrics::counter!("folio_logins_total", "outcome" => "success").increment(1);
    info!("Administrator {} logged in", admin.email);

    Ok(issued)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn temp_db() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite:{}?mode=rwc", dir.path().join("auth.db").display());
        let db = Database::new(&url).await.unwrap();
        (dir, db)
    }

    #[tokio::test]
    async fn test_ensure_admin_creates_once() {
        let (_dir, db) = temp_db().await;

        assert!(ensure_admin(&db, "admin@x.com", "rightpw").await.unwrap());
        assert!(!ensure_admin(&db, "admin@x.com", "changed").await.unwrap());

        let admin = db.get_admin_by_email("admin@x.com").await.unwrap().unwrap();
        assert!(verify_password("rightpw", &admin.password_hash));
        assert!(!verify_password("changed", &admin.password_hash));
    }

    #[tokio::test]
    async fn test_ensure_admin_keeps_existing_identity() {
        let (_dir, db) = temp_db().await;
        ensure_admin(&db, "admin@x.com", "rightpw").await.unwrap();

        assert!(!ensure_admin(&db, "other@x.com", "pw").await.unwrap());
        assert!(db.get_admin_by_email("other@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_success() {
        let (_dir, db) = temp_db().await;
        let jwt = JwtManager::new("login-secret");
        ensure_admin(&db, "admin@x.com", "rightpw").await.unwrap();

        let issued = login(&db, &jwt, "admin@x.com", "rightpw", Duration::minutes(30))
            .await
            .unwrap();
        assert_eq!(issued.subject, "admin@x.com");
        assert_eq!(issued.expires_in(), 1800);
        assert_eq!(jwt.verify(&issued.token).unwrap(), "admin@x.com");
    }

    #[tokio::test]
    async fn test_login_failures_are_identical() {
        let (_dir, db) = temp_db().await;
        let jwt = JwtManager::new("login-secret");
        ensure_admin(&db, "admin@x.com", "rightpw").await.unwrap();

        let wrong_password = login(&db, &jwt, "admin@x.com", "wrongpw", Duration::minutes(30)).await;
        let unknown_email = login(&db, &jwt, "nobody@x.com", "rightpw", Duration::minutes(30)).await;

        assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));
        assert!(matches!(unknown_email, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_dummy_hash_never_verifies() {
        assert!(!DUMMY_HASH.is_empty());
        assert!(!verify_password("", &DUMMY_HASH));
        assert!(!verify_password("rightpw", &DUMMY_HASH));
    }
}
