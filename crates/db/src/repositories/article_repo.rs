//! Repository for the `articles` table.
//!
//! Every statement filters on `user_id`; a row owned by someone else is
//! indistinguishable from a missing one.

use sqlx::PgPool;
use vidscribe_core::article_status::ArticleStatus;
use vidscribe_core::types::DbId;

use crate::models::article::{Article, CreateArticle, UpdateArticle};

const COLUMNS: &str = "id, user_id, source_url, video_id, thumbnail_url, status_id, \
                       transcript, title, content, created_at, updated_at";

/// Owner-scoped CRUD for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article in `processing`, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateArticle) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles (user_id, source_url, video_id, thumbnail_url, title, status_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(input.user_id)
            .bind(&input.source_url)
            .bind(&input.video_id)
            .bind(&input.thumbnail_url)
            .bind(&input.title)
            .bind(ArticleStatus::Processing.id())
            .fetch_one(pool)
            .await
    }

    /// Find an article by ID for its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's articles, most recently created first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row matched: the article is missing, owned by
    /// someone else, or no longer in `input.expected_status`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateArticle,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE articles SET
                status_id = COALESCE($3, status_id),
                transcript = COALESCE($4, transcript),
                title = COALESCE($5, title),
                content = COALESCE($6, content)
             WHERE id = $1 AND user_id = $2
               AND ($7::SMALLINT IS NULL OR status_id = $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(user_id)
            .bind(input.status.map(ArticleStatus::id))
            .bind(&input.transcript)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.expected_status.map(ArticleStatus::id))
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an owner's article. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
