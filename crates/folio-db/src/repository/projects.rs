//! Project operations

use chrono::Utc;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{NewProject, Project};
use crate::repository::Database;
use crate::utils::{encode_list, format_datetime};

impl Database {
    // ==================== Project Operations ====================

    /// Insert a new project
    pub async fn insert_project(&self, project: NewProject) -> Result<Project, DbError> {
        let id = Uuid::new_v4().to_string();
        let created_at = project.created_at.unwrap_or_else(Utc::now);

        sqlx::query(
            r#"
            INSERT INTO projects (id, title, description, technologies, image_url, github_url, live_url, featured, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(encode_list(&project.technologies)?)
        .bind(&project.image_url)
        .bind(&project.github_url)
        .bind(&project.live_url)
        .bind(project.featured)
        .bind(format_datetime(&created_at))
        .execute(&self.pool)
        .await?;

        Ok(Project {
            id,
            title: project.title,
            description: project.description,
            technologies: project.technologies,
            image_url: project.image_url,
            github_url: project.github_url,
            live_url: project.live_url,
            featured: project.featured,
            created_at,
        })
    }

    /// List all projects, featured first and newest first within each group
    pub async fn list_projects(&self) -> Result<Vec<Project>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, technologies, image_url, github_url, live_url, featured, created_at
            FROM projects
            ORDER BY featured DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Project::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Get a project by ID
    pub async fn get_project(&self, id: &str) -> Result<Option<Project>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, title, description, technologies, image_url, github_url, live_url, featured, created_at
            FROM projects
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Project::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Replace every editable field of a project
    ///
    /// The creation time is preserved unless one is supplied explicitly.
    pub async fn update_project(&self, id: &str, project: NewProject) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET title = ?, description = ?, technologies = ?, image_url = ?, github_url = ?,
                live_url = ?, featured = ?, created_at = COALESCE(?, created_at)
            WHERE id = ?
            "#,
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(encode_list(&project.technologies)?)
        .bind(&project.image_url)
        .bind(&project.github_url)
        .bind(&project.live_url)
        .bind(project.featured)
        .bind(project.created_at.as_ref().map(format_datetime))
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a project
    pub async fn delete_project(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::models::NewProject;
    use crate::repository::test_support::temp_db;

    fn project(title: &str, featured: bool, year: i32) -> NewProject {
        NewProject {
            title: title.to_string(),
            description: format!("{} description", title),
            technologies: vec!["Rust".to_string(), "axum".to_string()],
            featured,
            created_at: Some(Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_orders_featured_then_newest() {
        let (_dir, db) = temp_db().await;
        db.insert_project(project("old-plain", false, 2020)).await.unwrap();
        db.insert_project(project("new-plain", false, 2024)).await.unwrap();
        db.insert_project(project("old-featured", true, 2019)).await.unwrap();

        let titles: Vec<String> = db
            .list_projects()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["old-featured", "new-plain", "old-plain"]);
    }

    #[tokio::test]
    async fn test_update_preserves_created_at() {
        let (_dir, db) = temp_db().await;
        let created = db.insert_project(project("Pi Ads", false, 2023)).await.unwrap();

        let mut changes = project("Pi Ads v2", true, 2023);
        changes.created_at = None;
        changes.live_url = Some("https://example.com".to_string());
        assert!(db.update_project(&created.id, changes).await.unwrap());

        let updated = db.get_project(&created.id).await.unwrap().unwrap();
        assert_eq!(updated.title, "Pi Ads v2");
        assert!(updated.featured);
        assert_eq!(updated.live_url.as_deref(), Some("https://example.com"));
        assert_eq!(updated.technologies, vec!["Rust", "axum"]);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_missing_project() {
        let (_dir, db) = temp_db().await;
        assert!(!db.update_project("nope", project("x", false, 2020)).await.unwrap());
        assert!(!db.delete_project("nope").await.unwrap());
        assert!(db.get_project("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_project() {
        let (_dir, db) = temp_db().await;
        let created = db.insert_project(project("Portfolio", false, 2023)).await.unwrap();
        assert!(db.delete_project(&created.id).await.unwrap());
        assert!(db.list_projects().await.unwrap().is_empty());
    }
}
