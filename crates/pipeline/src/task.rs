use tokio::task::JoinHandle;
use vidscribe_core::types::DbId;
use vidscribe_db::models::article::Article;

use crate::error::LifecycleError;

/// Handle to a spawned transcript or generation task.
///
/// Dropping the handle detaches the task; it still runs to completion.
#[derive(Debug)]
pub struct TaskHandle {
    article_id: DbId,
    join: JoinHandle<Result<Article, LifecycleError>>,
}

impl TaskHandle {
    pub(crate) fn new(article_id: DbId, join: JoinHandle<Result<Article, LifecycleError>>) -> Self {
        Self { article_id, join }
    }

    pub fn article_id(&self) -> DbId {
        self.article_id
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the task and return the article as last persisted by it.
    pub async fn wait(self) -> Result<Article, LifecycleError> {
        match self.join.await {
            Ok(result) => result,
            Err(e) => Err(LifecycleError::TaskFailed(e.to_string())),
        }
    }
}
