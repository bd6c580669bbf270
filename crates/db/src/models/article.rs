//! Article entity model and DTOs.

use sqlx::FromRow;
use vidscribe_core::article_status::{ArticleStatus, StatusId};
use vidscribe_core::error::CoreError;
use vidscribe_core::types::{DbId, Timestamp};

/// An article row from the `articles` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Article {
    pub id: DbId,
    /// Owning user. Every query filters on it.
    pub user_id: DbId,
    pub source_url: String,
    pub video_id: String,
    pub thumbnail_url: Option<String>,
    pub status_id: StatusId,
    pub transcript: Option<String>,
    pub title: String,
    pub content: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Article {
    /// Decode the stored status id.
    pub fn status(&self) -> Result<ArticleStatus, CoreError> {
        ArticleStatus::from_id(self.status_id)
    }
}

/// DTO for inserting a freshly submitted article.
///
/// There is no status field: every article starts in `processing`.
#[derive(Debug, Clone)]
pub struct CreateArticle {
    pub user_id: DbId,
    pub source_url: String,
    pub video_id: String,
    pub thumbnail_url: Option<String>,
    pub title: String,
}

/// Partial update. `None` fields are left untouched.
///
/// When `expected_status` is set the update only applies if the row is still
/// in that status, which turns a status change into a compare-and-set.
#[derive(Debug, Clone, Default)]
pub struct UpdateArticle {
    pub status: Option<ArticleStatus>,
    pub transcript: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub expected_status: Option<ArticleStatus>,
}
