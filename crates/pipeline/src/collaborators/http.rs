//! HTTP clients for the standalone transcription and generation services.
//!
//! ```text
//! POST {transcribe}/transcribe        {"url"}            -> {"transcription", "title"?}
//! POST {generation}/generate_article  {"transcription"}  -> {"article"}
//! ```
//!
//! Both services answer errors as `{"error": "..."}` with a non-2xx status.

use async_trait::async_trait;
use serde::Deserialize;
use vidscribe_core::generation::{
    CollaboratorError, ContentGenerator, FetchedTranscript, GeneratedArticle, TranscriptRequest,
    TranscriptSource,
};
use vidscribe_core::transcript::derive_title;

#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    transcription: String,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    article: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the transcription service.
#[derive(Debug, Clone)]
pub struct HttpTranscriptSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTranscriptSource {
    /// * `base_url` - e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] (shares its connection pool).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TranscriptSource for HttpTranscriptSource {
    async fn fetch_transcript(
        &self,
        request: &TranscriptRequest,
    ) -> Result<FetchedTranscript, CollaboratorError> {
        let response = self
            .client
            .post(format!("{}/transcribe", self.base_url))
            .json(&serde_json::json!({ "url": request.source_url }))
            .send()
            .await
            .map_err(unavailable)?;

        let body: TranscribeResponse = parse_response(response).await?;
        Ok(FetchedTranscript {
            text: body.transcription,
            title: body.title.filter(|t| !t.trim().is_empty()),
        })
    }
}

/// Client for the article-generation service.
///
/// The service returns only article text; the title is derived from it.
#[derive(Debug, Clone)]
pub struct HttpContentGenerator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpContentGenerator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ContentGenerator for HttpContentGenerator {
    async fn generate_article(
        &self,
        transcript: &str,
    ) -> Result<GeneratedArticle, CollaboratorError> {
        let response = self
            .client
            .post(format!("{}/generate_article", self.base_url))
            .json(&serde_json::json!({ "transcription": transcript }))
            .send()
            .await
            .map_err(unavailable)?;

        let body: GenerateResponse = parse_response(response).await?;
        if body.article.trim().is_empty() {
            return Err(CollaboratorError::InvalidResponse(
                "Generation service returned an empty article".into(),
            ));
        }
        Ok(GeneratedArticle {
            title: derive_title(&body.article),
            content: body.article,
        })
    }
}

fn unavailable(err: reqwest::Error) -> CollaboratorError {
    CollaboratorError::Unavailable(err.to_string())
}

/// Decode a success body, or turn a non-2xx answer into
/// [`CollaboratorError::Rejected`] using its `error` field when present.
async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, CollaboratorError> {
    let status = response.status();
    let text = response.text().await.map_err(unavailable)?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|b| b.error)
            .unwrap_or(text);
        return Err(CollaboratorError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(|e| CollaboratorError::InvalidResponse(e.to_string()))
}
