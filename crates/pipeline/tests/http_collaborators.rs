//! HTTP adapters against a mocked transcription/generation service.

use assert_matches::assert_matches;
use serde_json::json;
use vidscribe_core::generation::{
    CollaboratorError, ContentGenerator, TranscriptRequest, TranscriptSource,
};
use vidscribe_pipeline::collaborators::http::{HttpContentGenerator, HttpTranscriptSource};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> TranscriptRequest {
    TranscriptRequest {
        video_id: "dQw4w9WgXcQ".into(),
        source_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".into(),
    }
}

// ---------------------------------------------------------------------------
// Transcription service
// ---------------------------------------------------------------------------

#[tokio::test]
async fn transcript_is_fetched_with_source_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .and(body_json(json!({ "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Never Gonna Give You Up",
            "transcription": "first line\nsecond line",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpTranscriptSource::new(format!("{}/", server.uri()));
    let fetched = source.fetch_transcript(&request()).await.unwrap();

    assert_eq!(fetched.text, "first line\nsecond line");
    assert_eq!(fetched.title.as_deref(), Some("Never Gonna Give You Up"));
}

#[tokio::test]
async fn transcript_title_is_optional() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "transcription": "text", "title": " " })),
        )
        .mount(&server)
        .await;

    let fetched = HttpTranscriptSource::new(server.uri())
        .fetch_transcript(&request())
        .await
        .unwrap();
    assert!(fetched.title.is_none());
}

#[tokio::test]
async fn transcription_error_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "Invalid YouTube URL" })))
        .mount(&server)
        .await;

    let err = HttpTranscriptSource::new(server.uri())
        .fetch_transcript(&request())
        .await
        .unwrap_err();
    assert_matches!(
        err,
        CollaboratorError::Rejected { status: 400, ref message } if message == "Invalid YouTube URL"
    );
}

#[tokio::test]
async fn malformed_transcription_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "wrong field" })))
        .mount(&server)
        .await;

    let err = HttpTranscriptSource::new(server.uri())
        .fetch_transcript(&request())
        .await
        .unwrap_err();
    assert_matches!(err, CollaboratorError::InvalidResponse(_));
}

#[tokio::test]
async fn unreachable_service_is_unavailable() {
    // Nothing listens on port 9 on the loopback interface.
    let err = HttpTranscriptSource::new("http://127.0.0.1:9")
        .fetch_transcript(&request())
        .await
        .unwrap_err();
    assert_matches!(err, CollaboratorError::Unavailable(_));
}

// ---------------------------------------------------------------------------
// Generation service
// ---------------------------------------------------------------------------

#[tokio::test]
async fn article_title_is_derived_from_heading() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_article"))
        .and(body_json(json!({ "transcription": "the transcript" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "article": "# Growing Online\n\n## Intro\nBody",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generated = HttpContentGenerator::new(server.uri())
        .generate_article("the transcript")
        .await
        .unwrap();

    assert_eq!(generated.title, "Growing Online");
    assert_eq!(generated.content, "# Growing Online\n\n## Intro\nBody");
}

#[tokio::test]
async fn empty_article_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_article"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "article": "  " })))
        .mount(&server)
        .await;

    let err = HttpContentGenerator::new(server.uri())
        .generate_article("the transcript")
        .await
        .unwrap_err();
    assert_matches!(err, CollaboratorError::InvalidResponse(_));
}

#[tokio::test]
async fn plain_text_error_is_kept_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate_article"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = HttpContentGenerator::new(server.uri())
        .generate_article("the transcript")
        .await
        .unwrap_err();
    assert_matches!(
        err,
        CollaboratorError::Rejected { status: 503, ref message } if message == "upstream down"
    );
}
