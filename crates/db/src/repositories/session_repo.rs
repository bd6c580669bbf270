//! Repository for the `user_sessions` table.
//!
//! A session row backs one refresh token. Tokens are single-use: redeeming
//! one marks its row revoked in the same statement that looks it up.

use sqlx::PgPool;
use vidscribe_core::types::DbId;

use crate::models::session::{CreateSession, UserSession};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, is_revoked, \
                        user_agent, created_at, updated_at";

pub struct SessionRepo;

impl SessionRepo {
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at, user_agent)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Redeem a refresh token by hash.
    ///
    /// Returns the session as it was redeemed, or `None` when the token is
    /// unknown, expired or already used. Two concurrent redemptions of the
    /// same token cannot both succeed.
    pub async fn consume(pool: &PgPool, token_hash: &str) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions SET is_revoked = true
             WHERE refresh_token_hash = $1
               AND NOT is_revoked
               AND expires_at > NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Sign a user out everywhere. Returns how many live tokens were revoked.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let revoked = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true WHERE user_id = $1 AND NOT is_revoked",
        )
        .bind(user_id)
        .execute(pool)
        .await?
        .rows_affected();
        Ok(revoked)
    }

    /// Drop rows that can never be redeemed again (expired or revoked).
    pub async fn purge_unusable(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let purged = sqlx::query("DELETE FROM user_sessions WHERE is_revoked OR expires_at <= NOW()")
            .execute(pool)
            .await?
            .rows_affected();
        Ok(purged)
    }
}
