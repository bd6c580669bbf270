//! Route definitions for the `/wordpress-sites` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::wordpress_site;
use crate::state::AppState;

/// Routes mounted at `/wordpress-sites`. All require auth.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(wordpress_site::list).post(wordpress_site::create))
        .route("/{id}", delete(wordpress_site::delete))
}
