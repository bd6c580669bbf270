//! In-process [`ArticleStore`].
//!
//! Mirrors the Postgres semantics (owner scoping, newest-first listing,
//! expected-status guard, `updated_at` bump on every matched update) and
//! lets callers inject write failures.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use vidscribe_core::article_status::ArticleStatus;
use vidscribe_core::types::DbId;
use vidscribe_db::models::article::{Article, CreateArticle, UpdateArticle};

use crate::error::StoreError;
use crate::store::ArticleStore;

#[derive(Debug, Default)]
struct MemoryState {
    next_id: DbId,
    rows: BTreeMap<DbId, Article>,
    /// Remaining updates to fail before succeeding again.
    failing_updates: u32,
    /// Fail every operation while set.
    unavailable: bool,
    update_calls: u32,
}

#[derive(Debug, Default)]
pub struct MemoryArticleStore {
    state: Mutex<MemoryState>,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next `count` calls to `update_article` fail.
    pub fn fail_next_updates(&self, count: u32) {
        self.lock().failing_updates = count;
    }

    /// Fail every operation until called again with `false`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Number of `update_article` calls seen, failed ones included.
    pub fn update_calls(&self) -> u32 {
        self.lock().update_calls
    }

    /// Read a row regardless of owner.
    pub fn snapshot(&self, id: DbId) -> Option<Article> {
        self.lock().rows.get(&id).cloned()
    }

    /// Move a row's `updated_at` into the past.
    pub fn backdate(&self, id: DbId, by: chrono::Duration) {
        if let Some(row) = self.lock().rows.get_mut(&id) {
            row.updated_at -= by;
        }
    }

    fn check_available(state: &MemoryState) -> Result<(), StoreError> {
        if state.unavailable {
            return Err(StoreError::Unavailable("memory store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn create_article(&self, input: &CreateArticle) -> Result<Article, StoreError> {
        let mut state = self.lock();
        Self::check_available(&state)?;

        state.next_id += 1;
        let now = Utc::now();
        let article = Article {
            id: state.next_id,
            user_id: input.user_id,
            source_url: input.source_url.clone(),
            video_id: input.video_id.clone(),
            thumbnail_url: input.thumbnail_url.clone(),
            status_id: ArticleStatus::Processing.id(),
            transcript: None,
            title: input.title.clone(),
            content: None,
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(article.id, article.clone());
        Ok(article)
    }

    async fn get_article(&self, id: DbId, owner: DbId) -> Result<Option<Article>, StoreError> {
        let state = self.lock();
        Self::check_available(&state)?;
        Ok(state.rows.get(&id).filter(|a| a.user_id == owner).cloned())
    }

    async fn list_articles(&self, owner: DbId) -> Result<Vec<Article>, StoreError> {
        let state = self.lock();
        Self::check_available(&state)?;
        let mut articles: Vec<_> = state
            .rows
            .values()
            .filter(|a| a.user_id == owner)
            .cloned()
            .collect();
        articles.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(articles)
    }

    async fn update_article(
        &self,
        id: DbId,
        owner: DbId,
        update: &UpdateArticle,
    ) -> Result<Option<Article>, StoreError> {
        let mut state = self.lock();
        state.update_calls += 1;
        Self::check_available(&state)?;
        if state.failing_updates > 0 {
            state.failing_updates -= 1;
            return Err(StoreError::Unavailable("injected update failure".into()));
        }

        let Some(row) = state.rows.get_mut(&id).filter(|a| a.user_id == owner) else {
            return Ok(None);
        };
        if let Some(expected) = update.expected_status {
            if row.status_id != expected.id() {
                return Ok(None);
            }
        }

        if let Some(status) = update.status {
            row.status_id = status.id();
        }
        if let Some(transcript) = &update.transcript {
            row.transcript = Some(transcript.clone());
        }
        if let Some(title) = &update.title {
            row.title = title.clone();
        }
        if let Some(content) = &update.content {
            row.content = Some(content.clone());
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete_article(&self, id: DbId, owner: DbId) -> Result<bool, StoreError> {
        let mut state = self.lock();
        Self::check_available(&state)?;
        let owned = state.rows.get(&id).is_some_and(|a| a.user_id == owner);
        if owned {
            state.rows.remove(&id);
        }
        Ok(owned)
    }
}
