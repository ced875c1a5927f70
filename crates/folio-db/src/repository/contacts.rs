//! Contact message operations

use chrono::Utc;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{ContactMessage, NewContactMessage};
use crate::repository::Database;
use crate::utils::format_datetime;

impl Database {
    // ==================== Contact Operations ====================

    /// Store a contact form submission
    pub async fn insert_contact(&self, contact: NewContactMessage) -> Result<ContactMessage, DbError> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO contacts (id, name, email, message, subject, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.message)
        .bind(&contact.subject)
        .bind(format_datetime(&now))
        .execute(&self.pool)
        .await?;

        Ok(ContactMessage {
            id,
            name: contact.name,
            email: contact.email,
            message: contact.message,
            subject: contact.subject,
            created_at: now,
        })
    }

    /// List contact messages, newest first
    pub async fn list_contacts(&self) -> Result<Vec<ContactMessage>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, message, subject, created_at
            FROM contacts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| ContactMessage::try_from(row).map_err(DbError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::models::NewContactMessage;
    use crate::repository::test_support::temp_db;

    #[tokio::test]
    async fn test_contacts_newest_first() {
        let (_dir, db) = temp_db().await;
        for name in ["first", "second"] {
            db.insert_contact(NewContactMessage {
                name: name.to_string(),
                email: format!("{}@example.com", name),
                message: "Hello there".to_string(),
                subject: "Portfolio Contact".to_string(),
            })
            .await
            .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let contacts = db.list_contacts().await.unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].name, "second");
        assert_eq!(contacts[1].email, "first@example.com");
    }
}
