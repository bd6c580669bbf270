//! Article lifecycle states and the edges between them.
//!
//! ```text
//! (submit) -> processing -> draft <-> generating
//!                           draft -> draft        (save)
//!                                    published    (declared, unreachable)
//! ```
//!
//! Discriminants match the seed order of the `article_statuses` lookup table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    /// Created; waiting for the transcript.
    Processing = 1,
    /// Content generation in flight.
    Generating = 2,
    /// Editable.
    Draft = 3,
    /// Reserved for the publishing integration. No transition leads here.
    Published = 4,
}

impl ArticleStatus {
    pub const ALL: [ArticleStatus; 4] = [
        Self::Processing,
        Self::Generating,
        Self::Draft,
        Self::Published,
    ];

    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Resolve a database status ID.
    pub fn from_id(id: StatusId) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.id() == id)
            .ok_or_else(|| CoreError::Internal(format!("Unknown article status id {id}")))
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Generating => "generating",
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    /// Human-readable label shown in listings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Generating => "Generating content",
            other => other.as_str(),
        }
    }

    /// Whether `self -> next` is an edge of the lifecycle.
    pub fn can_transition_to(self, next: ArticleStatus) -> bool {
        matches!(
            (self, next),
            (Self::Processing, Self::Draft)
                | (Self::Draft, Self::Generating)
                | (Self::Generating, Self::Draft)
                | (Self::Draft, Self::Draft)
        )
    }

    /// Waiting on an external collaborator.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Processing | Self::Generating)
    }
}

impl From<ArticleStatus> for StatusId {
    fn from(value: ArticleStatus) -> Self {
        value as StatusId
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown article status '{s}'")))
    }
}

/// A pending article whose last update is older than `stall_after` is
/// considered stalled and may be retried.
pub fn is_stalled(
    status: ArticleStatus,
    updated_at: Timestamp,
    now: Timestamp,
    stall_after: chrono::Duration,
) -> bool {
    status.is_pending() && now - updated_at >= stall_after
}
