//! Route definitions for the `/articles` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::article;
use crate::state::AppState;

/// Routes mounted at `/articles`. All require auth.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// POST   /{id}/generate    -> generate
/// POST   /{id}/retry       -> retry
/// GET    /{id}/transcript  -> transcript
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(article::list).post(article::create))
        .route(
            "/{id}",
            get(article::get_by_id)
                .put(article::update)
                .delete(article::delete),
        )
        .route("/{id}/generate", post(article::generate))
        .route("/{id}/retry", post(article::retry))
        .route("/{id}/transcript", get(article::transcript))
}
