//! Work experience operations

use uuid::Uuid;

use crate::error::DbError;
use crate::models::{Experience, NewExperience};
use crate::repository::Database;
use crate::utils::encode_list;

impl Database {
    // ==================== Experience Operations ====================

    /// Insert a new experience entry
    pub async fn insert_experience(&self, exp: NewExperience) -> Result<Experience, DbError> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO experiences (id, company, position, description, start_date, end_date, technologies)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&exp.company)
        .bind(&exp.position)
        .bind(&exp.description)
        .bind(&exp.start_date)
        .bind(&exp.end_date)
        .bind(encode_list(&exp.technologies)?)
        .execute(&self.pool)
        .await?;

        Ok(Experience {
            id,
            company: exp.company,
            position: exp.position,
            description: exp.description,
            start_date: exp.start_date,
            end_date: exp.end_date,
            technologies: exp.technologies,
        })
    }

    /// List experience entries, most recent start date first
    pub async fn list_experiences(&self) -> Result<Vec<Experience>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, company, position, description, start_date, end_date, technologies
            FROM experiences
            ORDER BY start_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Experience::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Delete an experience entry
    pub async fn delete_experience(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM experiences WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::NewExperience;
    use crate::repository::test_support::temp_db;

    #[tokio::test]
    async fn test_current_role_listed_first() {
        let (_dir, db) = temp_db().await;
        db.insert_experience(NewExperience {
            company: "Student Projects".to_string(),
            position: "Software Developer".to_string(),
            description: "Built things".to_string(),
            start_date: "2022-01".to_string(),
            end_date: Some("2023-12".to_string()),
            technologies: vec!["Flask".to_string()],
        })
        .await
        .unwrap();
        let current = db
            .insert_experience(NewExperience {
                company: "Still in Search".to_string(),
                position: "Full Stack Developer".to_string(),
                description: "Looking".to_string(),
                start_date: "2024-01".to_string(),
                end_date: None,
                technologies: vec![],
            })
            .await
            .unwrap();

        let listed = db.list_experiences().await.unwrap();
        assert_eq!(listed[0].id, current.id);
        assert!(listed[0].end_date.is_none());
        assert_eq!(listed[1].technologies, vec!["Flask"]);

        assert!(db.delete_experience(&current.id).await.unwrap());
        assert_eq!(db.list_experiences().await.unwrap().len(), 1);
    }
}
