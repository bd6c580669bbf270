//! HTTP-level integration tests for the `/articles` endpoints.
//!
//! Background tasks run against simulated collaborators with no delay, so
//! tests poll the article until the task's write lands.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::Router;
use common::{body_json, delete_auth, get_auth, post_auth, post_json, post_json_auth, put_json_auth};
use sqlx::PgPool;
use vidscribe_core::article_status::ArticleStatus;
use vidscribe_core::generation::{
    CollaboratorError, FetchedTranscript, TranscriptRequest, TranscriptSource,
};
use vidscribe_db::models::article::{CreateArticle, UpdateArticle};
use vidscribe_db::repositories::ArticleRepo;
use vidscribe_pipeline::collaborators::simulated::{
    SimulatedContentGenerator, SIMULATED_TITLE,
};
use vidscribe_pipeline::LifecycleConfig;

const VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Transcript source that never answers.
struct StuckTranscripts;

#[async_trait]
impl TranscriptSource for StuckTranscripts {
    async fn fetch_transcript(
        &self,
        _request: &TranscriptRequest,
    ) -> Result<FetchedTranscript, CollaboratorError> {
        std::future::pending().await
    }
}

/// Transcript source that always fails.
struct DownTranscripts;

#[async_trait]
impl TranscriptSource for DownTranscripts {
    async fn fetch_transcript(
        &self,
        _request: &TranscriptRequest,
    ) -> Result<FetchedTranscript, CollaboratorError> {
        Err(CollaboratorError::Unavailable("connection refused".into()))
    }
}

fn app_with_transcripts(
    pool: PgPool,
    lifecycle: LifecycleConfig,
    transcripts: Arc<dyn TranscriptSource>,
) -> Router {
    common::build_test_app_with(
        pool,
        lifecycle,
        transcripts,
        Arc::new(SimulatedContentGenerator::new(Duration::ZERO)),
    )
}

/// Sign up and return `(access_token, user_id)`.
async fn signup_with_id(app: Router, email: &str) -> (String, i64) {
    let body = serde_json::json!({ "email": email, "password": "secret123" });
    let json = body_json(post_json(app, "/api/v1/auth/signup", body).await).await;
    (
        json["access_token"].as_str().unwrap().to_string(),
        json["user"]["id"].as_i64().unwrap(),
    )
}

async fn submit(app: Router, token: &str, url: &str) -> serde_json::Value {
    let body = serde_json::json!({ "source_url": url });
    let response = post_json_auth(app, "/api/v1/articles", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Poll `GET /articles/{id}` until it reports `status`.
async fn wait_for_status(app: Router, token: &str, id: i64, status: &str) -> serde_json::Value {
    for _ in 0..100 {
        let response = get_auth(app.clone(), &format!("/api/v1/articles/{id}"), token).await;
        let json = body_json(response).await;
        if json["data"]["status"] == status {
            return json["data"].clone();
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("article {id} never reached status {status}");
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_returns_processing_article(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::signup(app.clone(), "submit@example.com").await;

    let article = submit(app, &token, VIDEO_URL).await;

    assert_eq!(article["status"], "processing");
    assert_eq!(article["status_label"], "processing");
    assert_eq!(article["stalled"], false);
    assert_eq!(article["video_id"], "dQw4w9WgXcQ");
    assert_eq!(article["title"], "Processing Video...");
    assert_eq!(
        article["thumbnail_url"],
        "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
    );
    assert_eq!(
        article["fallback_thumbnail_url"],
        "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
    );
    assert_eq!(article["embed_url"], "https://www.youtube.com/embed/dQw4w9WgXcQ");
    assert!(article["content"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_then_transcript_lands(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::signup(app.clone(), "transcript@example.com").await;

    let article = submit(app.clone(), &token, "https://youtu.be/dQw4w9WgXcQ").await;
    let id = article["id"].as_i64().unwrap();

    let draft = wait_for_status(app.clone(), &token, id, "draft").await;
    assert!(draft["transcript"].as_str().unwrap().contains("welcome"));

    let response = get_auth(app, &format!("/api/v1/articles/{id}/transcript"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let lines = json["data"]["lines"].as_array().unwrap();
    assert_eq!(lines[0]["timestamp"], "00:00");
    assert_eq!(lines[1]["timestamp"], "01:00");
    assert!(lines.iter().all(|l| !l["text"].as_str().unwrap().trim().is_empty()));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_invalid_url_creates_nothing(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::signup(app.clone(), "badurl@example.com").await;

    let body = serde_json::json!({ "source_url": "https://vimeo.com/12345" });
    let response = post_json_auth(app.clone(), "/api/v1/articles", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_SOURCE_URL");

    let json = body_json(get_auth(app, "/api/v1/articles", &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_is_newest_first(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::signup(app.clone(), "lister@example.com").await;

    let first = submit(app.clone(), &token, VIDEO_URL).await;
    let second = submit(app.clone(), &token, "https://youtu.be/aaaaaaaaaaa").await;

    let json = body_json(get_auth(app, "/api/v1/articles", &token).await).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![second["id"].as_i64().unwrap(), first["id"].as_i64().unwrap()]
    );
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_generate_produces_article(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::signup(app.clone(), "generate@example.com").await;

    let id = submit(app.clone(), &token, VIDEO_URL).await["id"].as_i64().unwrap();
    wait_for_status(app.clone(), &token, id, "draft").await;

    let response = post_auth(app.clone(), &format!("/api/v1/articles/{id}/generate"), &token).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "generating");
    assert_eq!(json["data"]["status_label"], "Generating content");

    let draft = wait_for_status(app, &token, id, "draft").await;
    assert_eq!(draft["title"], SIMULATED_TITLE);
    assert!(draft["content"]
        .as_str()
        .unwrap()
        .starts_with(&format!("# {SIMULATED_TITLE}")));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_generate_requires_draft(pool: PgPool) {
    let app = app_with_transcripts(pool, LifecycleConfig::default(), Arc::new(StuckTranscripts));
    let token = common::signup(app.clone(), "early@example.com").await;

    let id = submit(app.clone(), &token, VIDEO_URL).await["id"].as_i64().unwrap();

    let response = post_auth(app, &format!("/api/v1/articles/{id}/generate"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "INVALID_TRANSITION");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_generate_rejects_blank_transcript(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, user_id) = signup_with_id(app.clone(), "blank@example.com").await;

    let article = ArticleRepo::create(
        &pool,
        &CreateArticle {
            user_id,
            source_url: VIDEO_URL.into(),
            video_id: "dQw4w9WgXcQ".into(),
            thumbnail_url: None,
            title: "Processing Video...".into(),
        },
    )
    .await
    .unwrap();
    let to_blank_draft = UpdateArticle {
        status: Some(ArticleStatus::Draft),
        transcript: Some("   \n ".into()),
        ..Default::default()
    };
    ArticleRepo::update(&pool, article.id, user_id, &to_blank_draft)
        .await
        .unwrap()
        .unwrap();

    let response =
        post_auth(app.clone(), &format!("/api/v1/articles/{}/generate", article.id), &token).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "GENERATION_REJECTED");

    let unchanged = ArticleRepo::find_by_id(&pool, article.id, user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.status_id, ArticleStatus::Draft.id());
}

// ---------------------------------------------------------------------------
// Editing and deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_save_edits_on_draft(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::signup(app.clone(), "editor@example.com").await;

    let id = submit(app.clone(), &token, VIDEO_URL).await["id"].as_i64().unwrap();
    wait_for_status(app.clone(), &token, id, "draft").await;

    let body = serde_json::json!({ "title": "  My title ", "content": "Body\n\n" });
    let response = put_json_auth(app, &format!("/api/v1/articles/{id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "draft");
    assert_eq!(json["data"]["title"], "  My title ");
    assert_eq!(json["data"]["content"], "Body\n\n");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_save_edits_rejected_while_processing(pool: PgPool) {
    let app = app_with_transcripts(pool, LifecycleConfig::default(), Arc::new(StuckTranscripts));
    let token = common::signup(app.clone(), "impatient@example.com").await;

    let id = submit(app.clone(), &token, VIDEO_URL).await["id"].as_i64().unwrap();

    let body = serde_json::json!({ "title": "t", "content": "c" });
    let response = put_json_auth(app, &format!("/api/v1/articles/{id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_articles_are_owner_scoped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = common::signup(app.clone(), "owner@example.com").await;
    let other = common::signup(app.clone(), "other@example.com").await;

    let id = submit(app.clone(), &owner, VIDEO_URL).await["id"].as_i64().unwrap();
    let uri = format!("/api/v1/articles/{id}");

    let response = get_auth(app.clone(), &uri, &other).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = delete_auth(app.clone(), &uri, &other).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(get_auth(app, "/api/v1/articles", &other).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_article(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::signup(app.clone(), "deleter@example.com").await;

    let id = submit(app.clone(), &token, VIDEO_URL).await["id"].as_i64().unwrap();
    let uri = format!("/api/v1/articles/{id}");

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Stalls and retry
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_retry_requires_stalled(pool: PgPool) {
    let app = app_with_transcripts(pool, LifecycleConfig::default(), Arc::new(DownTranscripts));
    let token = common::signup(app.clone(), "patient@example.com").await;

    let id = submit(app.clone(), &token, VIDEO_URL).await["id"].as_i64().unwrap();

    let response = post_auth(app, &format!("/api/v1/articles/{id}/retry"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "NOT_STALLED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_failed_transcript_is_stalled_and_retryable(pool: PgPool) {
    let lifecycle = LifecycleConfig {
        stall_after: chrono::Duration::zero(),
        ..LifecycleConfig::default()
    };
    let app = app_with_transcripts(pool, lifecycle, Arc::new(DownTranscripts));
    let token = common::signup(app.clone(), "stalled@example.com").await;

    let id = submit(app.clone(), &token, VIDEO_URL).await["id"].as_i64().unwrap();

    // The failed task may still be releasing its slot.
    let uri_get = format!("/api/v1/articles/{id}");
    let mut stalled = false;
    for _ in 0..100 {
        let json = body_json(get_auth(app.clone(), &uri_get, &token).await).await;
        assert_eq!(json["data"]["status"], "processing");
        if json["data"]["stalled"] == true {
            stalled = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(stalled, "failed transcript never reported as stalled");

    let uri = format!("/api/v1/articles/{id}/retry");
    for _ in 0..100 {
        let response = post_auth(app.clone(), &uri, &token).await;
        if response.status() == StatusCode::ACCEPTED {
            let json = body_json(response).await;
            assert_eq!(json["data"]["status"], "processing");
            return;
        }
        assert_eq!(body_json(response).await["code"], "IN_PROGRESS");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("retry was never accepted");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_running_work_is_not_stalled(pool: PgPool) {
    let lifecycle = LifecycleConfig {
        stall_after: chrono::Duration::zero(),
        ..LifecycleConfig::default()
    };
    let app = app_with_transcripts(pool, lifecycle, Arc::new(StuckTranscripts));
    let token = common::signup(app.clone(), "busy@example.com").await;

    let id = submit(app.clone(), &token, VIDEO_URL).await["id"].as_i64().unwrap();

    let article = wait_for_status(app.clone(), &token, id, "processing").await;
    assert_eq!(article["stalled"], false);

    let response = post_auth(app, &format!("/api/v1/articles/{id}/retry"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "IN_PROGRESS");
}
