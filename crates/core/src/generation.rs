//! Contracts for the two external collaborators driving the article
//! lifecycle: transcript acquisition and content generation.
//!
//! Implementations live in `vidscribe-pipeline`. The traits use
//! `async_trait` so the HTTP layer can hold them as `Arc<dyn ...>` and swap
//! the simulated adapters for real services without touching the lifecycle.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Title an article carries until generation or a manual edit replaces it.
pub const PLACEHOLDER_TITLE: &str = "Processing Video...";

/// What a transcript source needs to locate the video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRequest {
    pub video_id: String,
    pub source_url: String,
}

/// Transcript returned by a [`TranscriptSource`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FetchedTranscript {
    pub text: String,
    /// Video title, when the source knows it.
    pub title: Option<String>,
}

/// Article produced by a [`ContentGenerator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArticle {
    pub title: String,
    pub content: String,
}

/// Failures reported by a collaborator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CollaboratorError {
    /// The service could not be reached (network, DNS, TLS).
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with a non-success status.
    #[error("Service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The service answered but the payload was unusable.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No answer within the configured deadline.
    #[error("Timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// Produces the spoken-content transcript of a video.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch_transcript(
        &self,
        request: &TranscriptRequest,
    ) -> Result<FetchedTranscript, CollaboratorError>;
}

/// Writes an article from a transcript.
///
/// Callers must never invoke this with a blank transcript.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_article(&self, transcript: &str)
        -> Result<GeneratedArticle, CollaboratorError>;
}
