//! Handlers for the `/articles` resource.
//!
//! Every status change goes through the lifecycle manager in [`AppState`];
//! these handlers only translate HTTP to manager calls and shape responses.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;
use vidscribe_core::article_status::ArticleStatus;
use vidscribe_core::transcript::{timestamp_lines, TimestampedLine};
use vidscribe_core::types::{DbId, Timestamp};
use vidscribe_core::youtube::{embed_url, fallback_thumbnail_url};
use vidscribe_db::models::article::Article;
use vidscribe_pipeline::ArticleEdits;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /articles`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitArticleRequest {
    #[validate(length(min = 1, max = 2048, message = "Video URL must be 1-2048 characters"))]
    pub source_url: String,
}

/// Request body for `PUT /articles/{id}`. Both fields are stored verbatim.
#[derive(Debug, Deserialize)]
pub struct SaveArticleRequest {
    pub title: String,
    pub content: String,
}

/// Article as returned to clients, with display fields derived from the row.
#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub id: DbId,
    pub source_url: String,
    pub video_id: String,
    pub thumbnail_url: Option<String>,
    /// Lower-quality thumbnail to show when the preferred one is missing.
    pub fallback_thumbnail_url: Option<String>,
    pub embed_url: String,
    pub status: &'static str,
    pub status_label: &'static str,
    /// Pending for longer than the stall threshold; eligible for retry.
    pub stalled: bool,
    pub transcript: Option<String>,
    pub title: String,
    pub content: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Response body for `GET /articles/{id}/transcript`.
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub article_id: DbId,
    pub lines: Vec<TimestampedLine>,
}

impl ArticleResponse {
    fn build(state: &AppState, article: Article, now: Timestamp) -> AppResult<Self> {
        let status: ArticleStatus = article.status()?;
        // Work still running in this process is never reported as stalled.
        let stalled =
            !state.articles.is_busy(article.id) && state.articles.is_stalled(&article, now);
        Ok(Self {
            id: article.id,
            fallback_thumbnail_url: article
                .thumbnail_url
                .as_deref()
                .and_then(fallback_thumbnail_url),
            embed_url: embed_url(&article.video_id),
            source_url: article.source_url,
            video_id: article.video_id,
            thumbnail_url: article.thumbnail_url,
            status: status.as_str(),
            status_label: status.label(),
            stalled,
            transcript: article.transcript,
            title: article.title,
            content: article.content,
            created_at: article.created_at,
            updated_at: article.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/articles
///
/// The caller's articles, newest first.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ArticleResponse>>>> {
    let articles = state.articles.list(&auth_user.session()).await?;
    let now = Utc::now();
    let data = articles
        .into_iter()
        .map(|article| ArticleResponse::build(&state, article, now))
        .collect::<AppResult<Vec<_>>>()?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/articles
///
/// Record the video and start fetching its transcript. Responds immediately
/// with the `processing` article.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<SubmitArticleRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ArticleResponse>>)> {
    input.validate()?;
    let (article, _task) = state
        .articles
        .submit(&auth_user.session(), &input.source_url)
        .await?;
    let data = ArticleResponse::build(&state, article, Utc::now())?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// GET /api/v1/articles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ArticleResponse>>> {
    let article = state.articles.get(&auth_user.session(), id).await?;
    let data = ArticleResponse::build(&state, article, Utc::now())?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/articles/{id}
///
/// Save manual edits to a draft.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SaveArticleRequest>,
) -> AppResult<Json<DataResponse<ArticleResponse>>> {
    let edits = ArticleEdits {
        title: input.title,
        content: input.content,
    };
    let article = state
        .articles
        .save_edits(&auth_user.session(), id, edits)
        .await?;
    let data = ArticleResponse::build(&state, article, Utc::now())?;
    Ok(Json(DataResponse { data }))
}

/// DELETE /api/v1/articles/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.articles.delete(&auth_user.session(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/articles/{id}/generate
///
/// Move a draft to `generating` and start content generation. Responds with
/// 202 once the `generating` status is persisted.
pub async fn generate(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<ArticleResponse>>)> {
    let (article, _task) = state.articles.generate(&auth_user.session(), id).await?;
    let data = ArticleResponse::build(&state, article, Utc::now())?;
    Ok((StatusCode::ACCEPTED, Json(DataResponse { data })))
}

/// POST /api/v1/articles/{id}/retry
///
/// Re-run the pending task of a stalled article.
pub async fn retry(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<ArticleResponse>>)> {
    let now = Utc::now();
    let (article, _task) = state
        .articles
        .retry(&auth_user.session(), id, now)
        .await?;
    let data = ArticleResponse::build(&state, article, Utc::now())?;
    Ok((StatusCode::ACCEPTED, Json(DataResponse { data })))
}

/// GET /api/v1/articles/{id}/transcript
///
/// The transcript split into timestamped lines; empty while processing.
pub async fn transcript(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TranscriptResponse>>> {
    let article = state.articles.get(&auth_user.session(), id).await?;
    let lines = article
        .transcript
        .as_deref()
        .map(timestamp_lines)
        .unwrap_or_default();
    Ok(Json(DataResponse {
        data: TranscriptResponse {
            article_id: article.id,
            lines,
        },
    }))
}
