//! Blog post operations

use chrono::Utc;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{BlogPost, NewBlogPost};
use crate::repository::Database;
use crate::utils::{encode_list, format_datetime};

impl Database {
    // ==================== Blog Post Operations ====================

    /// Insert a new blog post
    pub async fn insert_blog_post(&self, post: NewBlogPost) -> Result<BlogPost, DbError> {
        let id = Uuid::new_v4().to_string();
        let created_at = post.created_at.unwrap_or_else(Utc::now);

        sqlx::query(
            r#"
            INSERT INTO blog_posts (id, title, content, excerpt, image_url, tags, published, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(&post.image_url)
        .bind(encode_list(&post.tags)?)
        .bind(post.published)
        .bind(format_datetime(&created_at))
        .execute(&self.pool)
        .await?;

        Ok(BlogPost {
            id,
            title: post.title,
            content: post.content,
            excerpt: post.excerpt,
            image_url: post.image_url,
            tags: post.tags,
            published: post.published,
            created_at,
        })
    }

    /// List blog posts, newest first
    ///
    /// When `published_only` is set, drafts are excluded.
    pub async fn list_blog_posts(&self, published_only: bool) -> Result<Vec<BlogPost>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, excerpt, image_url, tags, published, created_at
            FROM blog_posts
            WHERE published = 1 OR ? = 0
            ORDER BY created_at DESC
            "#,
        )
        .bind(published_only)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| BlogPost::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Get a blog post by ID
    pub async fn get_blog_post(&self, id: &str) -> Result<Option<BlogPost>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, title, content, excerpt, image_url, tags, published, created_at
            FROM blog_posts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| BlogPost::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Replace every editable field of a blog post
    pub async fn update_blog_post(&self, id: &str, post: NewBlogPost) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE blog_posts
            SET title = ?, content = ?, excerpt = ?, image_url = ?, tags = ?, published = ?,
                created_at = COALESCE(?, created_at)
            WHERE id = ?
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(&post.image_url)
        .bind(encode_list(&post.tags)?)
        .bind(post.published)
        .bind(post.created_at.as_ref().map(format_datetime))
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a blog post
    pub async fn delete_blog_post(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
