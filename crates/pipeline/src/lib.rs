//! Article lifecycle: the state machine that takes a submitted video URL
//! through transcript acquisition and content generation to an editable
//! draft.
//!
//! - [`manager`] -- [`ArticleLifecycleManager`], the only writer of status.
//! - [`store`] -- [`ArticleStore`] persistence seam and its Postgres adapter.
//! - [`memory`] -- in-process [`ArticleStore`] with failure injection.
//! - [`collaborators`] -- transcript and generation adapters.
//! - [`in_flight`] -- per-article mutual exclusion for background tasks.
//! - [`task`] -- handles to spawned lifecycle tasks.

pub mod backoff;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod in_flight;
pub mod manager;
pub mod memory;
pub mod store;
pub mod task;

pub use config::LifecycleConfig;
pub use error::{LifecycleError, StoreError};
pub use manager::{ArticleEdits, ArticleLifecycleManager};
pub use memory::MemoryArticleStore;
pub use store::{ArticleStore, PgArticleStore};
pub use task::TaskHandle;
