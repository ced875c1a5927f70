//! Administrator credential operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{AdminUser, NewAdminUser};
use crate::repository::Database;
use crate::utils::format_datetime;

impl Database {
    // ==================== Admin Operations ====================

    /// Insert the administrator record
    ///
    /// Only one administrator may exist; a second insert is rejected
    /// regardless of the email.
    pub async fn insert_admin(&self, admin: NewAdminUser) -> Result<AdminUser, DbError> {
        if self.has_admin().await? {
            return Err(DbError::Duplicate(format!(
                "Administrator already exists, refusing to add '{}'",
                admin.email
            )));
        }

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO admin_users (email, password_hash, created_at)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(format_datetime(&now))
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(AdminUser {
            id,
            email: admin.email,
            password_hash: admin.password_hash,
            created_at: now,
        })
    }

    /// Get the administrator by email
    pub async fn get_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, email, password_hash, created_at
            FROM admin_users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| AdminUser::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Check if the administrator record exists
    pub async fn has_admin(&self) -> Result<bool, DbError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM admin_users")
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = result.get("count");
        Ok(count > 0)
    }
}
