//! Skill operations

use uuid::Uuid;

use crate::error::DbError;
use crate::models::{NewSkill, Skill};
use crate::repository::Database;

impl Database {
    // ==================== Skill Operations ====================

    /// Insert a new skill
    pub async fn insert_skill(&self, skill: NewSkill) -> Result<Skill, DbError> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO skills (id, name, category, level, icon)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&skill.name)
        .bind(&skill.category)
        .bind(skill.level)
        .bind(&skill.icon)
        .execute(&self.pool)
        .await?;

        Ok(Skill {
            id,
            name: skill.name,
            category: skill.category,
            level: skill.level,
            icon: skill.icon,
        })
    }

    /// List all skills grouped by category, strongest first
    pub async fn list_skills(&self) -> Result<Vec<Skill>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, category, level, icon
            FROM skills
            ORDER BY category, level DESC, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Skill::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Delete a skill
    pub async fn delete_skill(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::NewSkill;
    use crate::repository::test_support::temp_db;

    fn skill(name: &str, category: &str, level: i64) -> NewSkill {
        NewSkill {
            name: name.to_string(),
            category: category.to_string(),
            level,
            icon: Some(name.to_lowercase()),
        }
    }

    #[tokio::test]
    async fn test_skills_grouped_by_category() {
        let (_dir, db) = temp_db().await;
        db.insert_skill(skill("React", "frontend", 5)).await.unwrap();
        db.insert_skill(skill("Flask", "backend", 4)).await.unwrap();
        db.insert_skill(skill("FastAPI", "backend", 5)).await.unwrap();

        let names: Vec<String> = db
            .list_skills()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["FastAPI", "Flask", "React"]);
    }

    #[tokio::test]
    async fn test_delete_skill() {
        let (_dir, db) = temp_db().await;
        let created = db.insert_skill(skill("Python", "languages", 5)).await.unwrap();
        assert!(db.delete_skill(&created.id).await.unwrap());
        assert!(!db.delete_skill(&created.id).await.unwrap());
    }
}
