pub mod article;
pub mod auth;
pub mod health;
pub mod wordpress_site;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                         create account (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
/// /auth/password                       change password (requires auth)
///
/// /articles                            list, submit
/// /articles/{id}                       get, save edits, delete
/// /articles/{id}/generate              start generation (POST)
/// /articles/{id}/retry                 retry stalled task (POST)
/// /articles/{id}/transcript            timestamped transcript (GET)
///
/// /wordpress-sites                     list, link
/// /wordpress-sites/{id}                unlink
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/articles", article::router())
        .nest("/wordpress-sites", wordpress_site::router())
}
