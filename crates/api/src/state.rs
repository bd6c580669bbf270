use std::sync::Arc;

use vidscribe_core::generation::{ContentGenerator, TranscriptSource};
use vidscribe_pipeline::{ArticleLifecycleManager, PgArticleStore};

use crate::config::ServerConfig;

/// Lifecycle manager over the Postgres article store.
pub type ArticleManager = ArticleLifecycleManager<PgArticleStore>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vidscribe_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Owner of every article status change.
    pub articles: Arc<ArticleManager>,
}

impl AppState {
    /// Build state with the collaborators selected by `config.collaborators`.
    pub fn new(pool: vidscribe_db::DbPool, config: ServerConfig) -> Self {
        let (transcripts, generator) = config.collaborators.build();
        Self::with_collaborators(pool, config, transcripts, generator)
    }

    /// Build state with explicit collaborators.
    pub fn with_collaborators(
        pool: vidscribe_db::DbPool,
        config: ServerConfig,
        transcripts: Arc<dyn TranscriptSource>,
        generator: Arc<dyn ContentGenerator>,
    ) -> Self {
        let articles = ArticleLifecycleManager::new(
            PgArticleStore::new(pool.clone()),
            transcripts,
            generator,
            config.lifecycle.clone(),
        );
        Self {
            pool,
            config: Arc::new(config),
            articles: Arc::new(articles),
        }
    }
}
