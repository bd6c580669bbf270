//! The article lifecycle manager.
//!
//! Owns every status change an article goes through:
//!
//! ```text
//! submit   -> processing --(transcript task)--> draft
//! generate -> draft -> generating --(generation task)--> draft
//! save     -> draft -> draft
//! retry    -> re-runs the task of a stalled processing/generating article
//! ```
//!
//! A status is only reported after the store acknowledged it. Background
//! writes are compare-and-set on the status the task started from, so a
//! task never overwrites a transition it did not expect.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use vidscribe_core::article_status::{self, ArticleStatus};
use vidscribe_core::generation::{
    CollaboratorError, ContentGenerator, TranscriptRequest, TranscriptSource, PLACEHOLDER_TITLE,
};
use vidscribe_core::transcript::is_blank_transcript;
use vidscribe_core::types::{DbId, Session, Timestamp};
use vidscribe_core::youtube::{extract_video_id, thumbnail_url, ThumbnailQuality};
use vidscribe_db::models::article::{Article, CreateArticle, UpdateArticle};

use crate::backoff::next_delay;
use crate::config::LifecycleConfig;
use crate::error::{LifecycleError, StoreError};
use crate::in_flight::{InFlight, InFlightGuard};
use crate::store::ArticleStore;
use crate::task::TaskHandle;

/// Manual edits saved on a draft. Both fields are stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleEdits {
    pub title: String,
    pub content: String,
}

pub struct ArticleLifecycleManager<S: ArticleStore> {
    shared: Arc<Shared<S>>,
}

/// State reachable from spawned tasks.
struct Shared<S> {
    store: S,
    transcripts: Arc<dyn TranscriptSource>,
    generator: Arc<dyn ContentGenerator>,
    in_flight: InFlight,
    config: LifecycleConfig,
}

impl<S: ArticleStore> ArticleLifecycleManager<S> {
    pub fn new(
        store: S,
        transcripts: Arc<dyn TranscriptSource>,
        generator: Arc<dyn ContentGenerator>,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                store,
                transcripts,
                generator,
                in_flight: InFlight::new(),
                config,
            }),
        }
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.shared.config
    }

    pub fn store(&self) -> &S {
        &self.shared.store
    }

    /// Whether a transcript or generation task is running for `id`.
    pub fn is_busy(&self, id: DbId) -> bool {
        self.shared.in_flight.contains(id)
    }

    /// Pending and not updated for longer than the configured threshold.
    pub fn is_stalled(&self, article: &Article, now: Timestamp) -> bool {
        article.status().is_ok_and(|status| {
            article_status::is_stalled(status, article.updated_at, now, self.shared.config.stall_after)
        })
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Create an article from a video URL and start fetching its transcript.
    ///
    /// The URL is validated before the store is touched; an invalid URL
    /// creates nothing.
    pub async fn submit(
        &self,
        session: &Session,
        source_url: &str,
    ) -> Result<(Article, TaskHandle), LifecycleError> {
        let source_url = source_url.trim();
        let video_id = extract_video_id(source_url)
            .map_err(|_| LifecycleError::InvalidSourceUrl(source_url.to_string()))?;

        let input = CreateArticle {
            user_id: session.user_id,
            source_url: source_url.to_string(),
            thumbnail_url: Some(thumbnail_url(&video_id, ThumbnailQuality::MaxRes)),
            video_id,
            title: PLACEHOLDER_TITLE.to_string(),
        };
        let article = self.shared.store.create_article(&input).await?;
        tracing::info!(
            article_id = article.id,
            user_id = session.user_id,
            video_id = %article.video_id,
            "Article submitted",
        );

        let guard = self
            .shared
            .in_flight
            .try_acquire(article.id)
            .ok_or(LifecycleError::InProgress { id: article.id })?;
        let handle = self.spawn_transcript(session.user_id, article.clone(), guard);
        Ok((article, handle))
    }

    /// Move a draft to `generating` and start content generation.
    ///
    /// The returned article is the confirmed `generating` row; the task is
    /// only spawned after that write succeeded.
    pub async fn generate(
        &self,
        session: &Session,
        id: DbId,
    ) -> Result<(Article, TaskHandle), LifecycleError> {
        let article = self.get(session, id).await?;
        let status = decode_status(&article)?;
        if status != ArticleStatus::Draft {
            return Err(LifecycleError::InvalidTransition {
                from: status,
                to: ArticleStatus::Generating,
            });
        }
        if is_blank_transcript(article.transcript.as_deref()) {
            tracing::warn!(article_id = id, "Generation rejected: no transcript");
            return Err(LifecycleError::GenerationRejected { id });
        }

        let guard = self
            .shared
            .in_flight
            .try_acquire(id)
            .ok_or(LifecycleError::InProgress { id })?;

        let update = UpdateArticle {
            status: Some(ArticleStatus::Generating),
            expected_status: Some(ArticleStatus::Draft),
            ..Default::default()
        };
        let article = match self
            .shared
            .store
            .update_article(id, session.user_id, &update)
            .await?
        {
            Some(article) => article,
            None => {
                return Err(self
                    .shared
                    .explain_miss(session.user_id, id, ArticleStatus::Generating)
                    .await)
            }
        };
        tracing::info!(article_id = id, "Article generating");

        let handle = self.spawn_generation(session.user_id, article.clone(), guard);
        Ok((article, handle))
    }

    /// Persist manual title/content edits on a draft.
    pub async fn save_edits(
        &self,
        session: &Session,
        id: DbId,
        edits: ArticleEdits,
    ) -> Result<Article, LifecycleError> {
        let article = self.get(session, id).await?;
        let status = decode_status(&article)?;
        if status != ArticleStatus::Draft {
            return Err(LifecycleError::InvalidTransition {
                from: status,
                to: ArticleStatus::Draft,
            });
        }

        let update = UpdateArticle {
            status: Some(ArticleStatus::Draft),
            title: Some(edits.title),
            content: Some(edits.content),
            expected_status: Some(ArticleStatus::Draft),
            ..Default::default()
        };
        match self
            .shared
            .store
            .update_article(id, session.user_id, &update)
            .await?
        {
            Some(article) => {
                tracing::info!(article_id = id, "Article edits saved");
                Ok(article)
            }
            None => Err(self
                .shared
                .explain_miss(session.user_id, id, ArticleStatus::Draft)
                .await),
        }
    }

    /// Re-run the task for a stalled `processing` or `generating` article.
    pub async fn retry(
        &self,
        session: &Session,
        id: DbId,
        now: Timestamp,
    ) -> Result<(Article, TaskHandle), LifecycleError> {
        let article = self.get(session, id).await?;
        let status = decode_status(&article)?;
        if !self.is_stalled(&article, now) {
            return Err(LifecycleError::NotStalled { id });
        }
        if status == ArticleStatus::Generating && is_blank_transcript(article.transcript.as_deref())
        {
            return Err(LifecycleError::GenerationRejected { id });
        }

        let guard = self
            .shared
            .in_flight
            .try_acquire(id)
            .ok_or(LifecycleError::InProgress { id })?;

        // Touch the row so it stops reporting as stalled while the task runs.
        let touch = UpdateArticle {
            expected_status: Some(status),
            ..Default::default()
        };
        let article = match self
            .shared
            .store
            .update_article(id, session.user_id, &touch)
            .await?
        {
            Some(article) => article,
            None => return Err(self.shared.explain_miss(session.user_id, id, status).await),
        };
        tracing::info!(article_id = id, status = %status, "Retrying stalled article");

        let handle = if status == ArticleStatus::Processing {
            self.spawn_transcript(session.user_id, article.clone(), guard)
        } else {
            self.spawn_generation(session.user_id, article.clone(), guard)
        };
        Ok((article, handle))
    }

    // -----------------------------------------------------------------------
    // Owner-scoped reads and deletion
    // -----------------------------------------------------------------------

    pub async fn get(&self, session: &Session, id: DbId) -> Result<Article, LifecycleError> {
        self.shared
            .store
            .get_article(id, session.user_id)
            .await?
            .ok_or(LifecycleError::NotFound { id })
    }

    /// The session owner's articles, newest first.
    pub async fn list(&self, session: &Session) -> Result<Vec<Article>, LifecycleError> {
        Ok(self.shared.store.list_articles(session.user_id).await?)
    }

    /// Delete an article. A task still running for it will find the row
    /// gone and stop without writing.
    pub async fn delete(&self, session: &Session, id: DbId) -> Result<(), LifecycleError> {
        if !self.shared.store.delete_article(id, session.user_id).await? {
            return Err(LifecycleError::NotFound { id });
        }
        tracing::info!(article_id = id, user_id = session.user_id, "Article deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    fn spawn_transcript(&self, owner: DbId, article: Article, guard: InFlightGuard) -> TaskHandle {
        let shared = Arc::clone(&self.shared);
        let id = article.id;
        let join = tokio::spawn(async move {
            let _guard = guard;
            let result = shared.run_transcript(owner, article).await;
            log_outcome("transcript", id, &result);
            result
        });
        TaskHandle::new(id, join)
    }

    fn spawn_generation(&self, owner: DbId, article: Article, guard: InFlightGuard) -> TaskHandle {
        let shared = Arc::clone(&self.shared);
        let id = article.id;
        let join = tokio::spawn(async move {
            let _guard = guard;
            let result = shared.run_generation(owner, article).await;
            log_outcome("generation", id, &result);
            result
        });
        TaskHandle::new(id, join)
    }
}

impl<S: ArticleStore> Shared<S> {
    /// `processing -> draft` once the transcript arrives.
    async fn run_transcript(&self, owner: DbId, article: Article) -> Result<Article, LifecycleError> {
        let request = TranscriptRequest {
            video_id: article.video_id.clone(),
            source_url: article.source_url.clone(),
        };
        tracing::debug!(article_id = article.id, video_id = %request.video_id, "Fetching transcript");

        let fetched = call_with_timeout(
            self.config.transcript_timeout,
            self.transcripts.fetch_transcript(&request),
        )
        .await?;
        if fetched.text.trim().is_empty() {
            return Err(CollaboratorError::InvalidResponse("Transcript is empty".into()).into());
        }

        let update = UpdateArticle {
            status: Some(ArticleStatus::Draft),
            transcript: Some(fetched.text),
            title: fetched.title,
            expected_status: Some(ArticleStatus::Processing),
            ..Default::default()
        };
        self.persist_completion(owner, article.id, ArticleStatus::Draft, &update)
            .await
    }

    /// `generating -> draft` with the generated title and content.
    async fn run_generation(&self, owner: DbId, article: Article) -> Result<Article, LifecycleError> {
        let transcript = article.transcript.as_deref().unwrap_or_default();
        tracing::debug!(article_id = article.id, "Generating content");

        let generated = call_with_timeout(
            self.config.generation_timeout,
            self.generator.generate_article(transcript),
        )
        .await?;

        let update = UpdateArticle {
            status: Some(ArticleStatus::Draft),
            title: Some(generated.title),
            content: Some(generated.content),
            expected_status: Some(ArticleStatus::Generating),
            ..Default::default()
        };
        self.persist_completion(owner, article.id, ArticleStatus::Draft, &update)
            .await
    }

    /// Apply a task's completion write, retrying store failures with
    /// exponential backoff. A status mismatch is not retried.
    async fn persist_completion(
        &self,
        owner: DbId,
        id: DbId,
        to: ArticleStatus,
        update: &UpdateArticle,
    ) -> Result<Article, LifecycleError> {
        let attempts = self.config.persist_attempts.max(1);
        let mut delay = self.config.persist_backoff.initial_delay;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            match self.store.update_article(id, owner, update).await {
                Ok(Some(article)) => return Ok(article),
                Ok(None) => return Err(self.explain_miss(owner, id, to).await),
                Err(e) if attempt < attempts => {
                    tracing::warn!(
                        article_id = id,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Completion write failed, retrying",
                    );
                    tokio::time::sleep(delay).await;
                    delay = next_delay(delay, &self.config.persist_backoff);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Work out why a guarded update matched no row.
    async fn explain_miss(&self, owner: DbId, id: DbId, to: ArticleStatus) -> LifecycleError {
        match self.store.get_article(id, owner).await {
            Ok(Some(current)) => match decode_status(&current) {
                Ok(from) => LifecycleError::InvalidTransition { from, to },
                Err(e) => e,
            },
            Ok(None) => LifecycleError::NotFound { id },
            Err(e) => LifecycleError::PersistenceFailure(e),
        }
    }
}

fn decode_status(article: &Article) -> Result<ArticleStatus, LifecycleError> {
    article
        .status()
        .map_err(|e| LifecycleError::PersistenceFailure(StoreError::Corrupt(e.to_string())))
}

async fn call_with_timeout<T>(
    deadline: Duration,
    call: impl Future<Output = Result<T, CollaboratorError>>,
) -> Result<T, CollaboratorError> {
    tokio::time::timeout(deadline, call)
        .await
        .unwrap_or(Err(CollaboratorError::Timeout {
            secs: deadline.as_secs(),
        }))
}

fn log_outcome(task: &'static str, id: DbId, result: &Result<Article, LifecycleError>) {
    match result {
        Ok(article) => tracing::info!(
            article_id = id,
            task,
            status = article.status().map_or("unknown", ArticleStatus::as_str),
            "Lifecycle task completed",
        ),
        Err(LifecycleError::NotFound { .. }) => {
            tracing::info!(article_id = id, task, "Article removed before task completed");
        }
        Err(e) => tracing::error!(article_id = id, task, error = %e, "Lifecycle task failed"),
    }
}
