//! WordPress site model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vidscribe_core::types::{DbId, Timestamp};

/// A row from the `wordpress_sites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WordPressSite {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for linking a new site. Name and URL are validated by the caller.
#[derive(Debug, Clone)]
pub struct CreateWordPressSite {
    pub user_id: DbId,
    pub name: String,
    pub url: String,
}
