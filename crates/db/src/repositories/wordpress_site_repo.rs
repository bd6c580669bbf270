//! Repository for the `wordpress_sites` table.

use sqlx::PgPool;
use vidscribe_core::types::DbId;

use crate::models::wordpress_site::{CreateWordPressSite, WordPressSite};

const COLUMNS: &str = "id, user_id, name, url, created_at, updated_at";

/// Owner-scoped storage for linked WordPress sites.
pub struct WordPressSiteRepo;

impl WordPressSiteRepo {
    /// Insert a site. A second site with the same URL for the same owner
    /// violates `uq_wordpress_sites_user_url`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWordPressSite,
    ) -> Result<WordPressSite, sqlx::Error> {
        let query = format!(
            "INSERT INTO wordpress_sites (user_id, name, url)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WordPressSite>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.url)
            .fetch_one(pool)
            .await
    }

    /// List an owner's sites, oldest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<WordPressSite>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM wordpress_sites WHERE user_id = $1 ORDER BY created_at, id");
        sqlx::query_as::<_, WordPressSite>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Delete an owner's site. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM wordpress_sites WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
