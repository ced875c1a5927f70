//! Database repository implementation

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbError;

// Submodules
mod admins;
mod blog_posts;
mod contacts;
mod experiences;
mod projects;
mod skills;

/// Database connection and operations
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection
    pub async fn new(database_url: &str) -> Result<Self, DbError> {
        info!("Connecting to database: {}", database_url);

        let pool = SqlitePool::connect(database_url).await?;
        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<(), DbError> {
        info!("Running database migrations");

        // Create tables if they don't exist
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS admin_users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                technologies TEXT NOT NULL DEFAULT '[]',
                image_url TEXT,
                github_url TEXT,
                live_url TEXT,
                featured INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS blog_posts (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                excerpt TEXT NOT NULL,
                image_url TEXT,
                tags TEXT NOT NULL DEFAULT '[]',
                published INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_blog_posts_published ON blog_posts(published, created_at)
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS skills (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                level INTEGER NOT NULL,
                icon TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS experiences (
                id TEXT PRIMARY KEY,
                company TEXT NOT NULL,
                position TEXT NOT NULL,
                description TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT,
                technologies TEXT NOT NULL DEFAULT '[]'
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contacts (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                message TEXT NOT NULL,
                subject TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Database migrations completed");
        Ok(())
    }

    /// Remove all public content (projects, blog posts, skills, experience)
    ///
    /// The admin record and contact messages are left untouched.
    pub async fn clear_content(&self) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        for table in ["projects", "blog_posts", "skills", "experiences"] {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Database;
    use tempfile::TempDir;

    /// Open a fresh database file inside a temporary directory
    pub async fn temp_db() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite:{}?mode=rwc", dir.path().join("folio.db").display());
        let db = Database::new(&url).await.unwrap();
        (dir, db)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::temp_db;
    use crate::models::{NewContactMessage, NewProject, NewSkill};

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let (dir, db) = temp_db().await;
        drop(db);
        let url = format!("sqlite:{}?mode=rwc", dir.path().join("folio.db").display());
        assert!(crate::Database::new(&url).await.is_ok());
    }

    #[tokio::test]
    async fn test_clear_content_keeps_contacts() {
        let (_dir, db) = temp_db().await;
        db.insert_project(NewProject {
            title: "Pi Ads".to_string(),
            description: "Signage".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
        db.insert_skill(NewSkill {
            name: "Rust".to_string(),
            category: "languages".to_string(),
            level: 4,
            icon: None,
        })
        .await
        .unwrap();
        db.insert_contact(NewContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello".to_string(),
            subject: "Hi".to_string(),
        })
        .await
        .unwrap();

        db.clear_content().await.unwrap();

        assert!(db.list_projects().await.unwrap().is_empty());
        assert!(db.list_skills().await.unwrap().is_empty());
        assert_eq!(db.list_contacts().await.unwrap().len(), 1);
    }
}
