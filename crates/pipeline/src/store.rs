//! Persistence seam for the lifecycle manager.
//!
//! Every method is scoped by owner. An article owned by someone else is
//! reported exactly like a missing one.

use async_trait::async_trait;
use sqlx::PgPool;
use vidscribe_core::types::DbId;
use vidscribe_db::models::article::{Article, CreateArticle, UpdateArticle};
use vidscribe_db::repositories::ArticleRepo;

use crate::error::StoreError;

#[async_trait]
pub trait ArticleStore: Send + Sync + 'static {
    /// Insert a new article in `processing`.
    async fn create_article(&self, input: &CreateArticle) -> Result<Article, StoreError>;

    async fn get_article(&self, id: DbId, owner: DbId) -> Result<Option<Article>, StoreError>;

    /// All of an owner's articles, newest first.
    async fn list_articles(&self, owner: DbId) -> Result<Vec<Article>, StoreError>;

    /// Partial update. `Ok(None)` when nothing matched, including a row whose
    /// status differs from `update.expected_status`.
    async fn update_article(
        &self,
        id: DbId,
        owner: DbId,
        update: &UpdateArticle,
    ) -> Result<Option<Article>, StoreError>;

    /// Returns `false` when nothing was deleted.
    async fn delete_article(&self, id: DbId, owner: DbId) -> Result<bool, StoreError>;
}

/// [`ArticleStore`] backed by the `articles` table.
#[derive(Debug, Clone)]
pub struct PgArticleStore {
    pool: PgPool,
}

impl PgArticleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleStore for PgArticleStore {
    async fn create_article(&self, input: &CreateArticle) -> Result<Article, StoreError> {
        Ok(ArticleRepo::create(&self.pool, input).await?)
    }

    async fn get_article(&self, id: DbId, owner: DbId) -> Result<Option<Article>, StoreError> {
        Ok(ArticleRepo::find_by_id(&self.pool, id, owner).await?)
    }

    async fn list_articles(&self, owner: DbId) -> Result<Vec<Article>, StoreError> {
        Ok(ArticleRepo::list_by_user(&self.pool, owner).await?)
    }

    async fn update_article(
        &self,
        id: DbId,
        owner: DbId,
        update: &UpdateArticle,
    ) -> Result<Option<Article>, StoreError> {
        Ok(ArticleRepo::update(&self.pool, id, owner, update).await?)
    }

    async fn delete_article(&self, id: DbId, owner: DbId) -> Result<bool, StoreError> {
        Ok(ArticleRepo::delete(&self.pool, id, owner).await?)
    }
}
