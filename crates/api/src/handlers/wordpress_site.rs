//! Handlers for the `/wordpress-sites` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use vidscribe_core::error::CoreError;
use vidscribe_core::types::DbId;
use vidscribe_core::wordpress::{normalize_site_url, validate_site_name};
use vidscribe_db::models::wordpress_site::{CreateWordPressSite, WordPressSite};
use vidscribe_db::repositories::WordPressSiteRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /wordpress-sites`.
#[derive(Debug, Deserialize)]
pub struct CreateSiteRequest {
    pub name: String,
    pub url: String,
}

/// GET /api/v1/wordpress-sites
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<WordPressSite>>>> {
    let sites = WordPressSiteRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: sites }))
}

/// POST /api/v1/wordpress-sites
///
/// Linking the same URL twice is a 409 (`uq_wordpress_sites_user_url`).
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateSiteRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<WordPressSite>>)> {
    let site_input = CreateWordPressSite {
        user_id: auth_user.user_id,
        name: validate_site_name(&input.name)?,
        url: normalize_site_url(&input.url)?,
    };
    let site = WordPressSiteRepo::create(&state.pool, &site_input).await?;
    tracing::info!(site_id = site.id, user_id = site.user_id, "WordPress site linked");
    Ok((StatusCode::CREATED, Json(DataResponse { data: site })))
}

/// DELETE /api/v1/wordpress-sites/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = WordPressSiteRepo::delete(&state.pool, id, auth_user.user_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "WordPress site",
            id,
        }))
    }
}
