use vidscribe_core::article_status::ArticleStatus;
use vidscribe_core::generation::CollaboratorError;
use vidscribe_core::types::DbId;

/// Failure reported by an [`ArticleStore`](crate::store::ArticleStore).
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not complete the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be decoded.
    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Errors surfaced by [`ArticleLifecycleManager`](crate::manager::ArticleLifecycleManager).
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// No video id could be extracted; nothing was created.
    #[error("Not a recognised YouTube video URL: {0}")]
    InvalidSourceUrl(String),

    /// The article does not exist or belongs to someone else.
    #[error("Article {id} not found")]
    NotFound { id: DbId },

    /// A read or write against the store failed. The persisted status is
    /// whatever it was before the failed write.
    #[error("Persistence failure: {0}")]
    PersistenceFailure(#[from] StoreError),

    /// Generation was requested for an article without a transcript.
    #[error("Article {id} has no transcript to generate from")]
    GenerationRejected { id: DbId },

    #[error("Cannot move article from {from} to {to}")]
    InvalidTransition {
        from: ArticleStatus,
        to: ArticleStatus,
    },

    /// Another task for the same article has not resolved yet.
    #[error("Article {id} already has a task in progress")]
    InProgress { id: DbId },

    /// Retry was requested for an article that is not stalled.
    #[error("Article {id} is not stalled")]
    NotStalled { id: DbId },

    #[error("Collaborator failure: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// The spawned task panicked or was aborted.
    #[error("Task failed: {0}")]
    TaskFailed(String),
}
