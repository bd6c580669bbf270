use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vidscribe_core::error::CoreError;
use vidscribe_pipeline::LifecycleError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`LifecycleError`] for domain errors and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce consistent
/// JSON error responses of the form `{"error": ..., "code": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `vidscribe_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A rejected article operation.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request body failed `validator` checks.
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => classify_core_error(core),

            // --- Article lifecycle ---
            AppError::Lifecycle(err) => classify_lifecycle_error(err),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                errors.to_string(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::InvalidSourceUrl(_) => (
            StatusCode::BAD_REQUEST,
            "INVALID_SOURCE_URL",
            err.to_string(),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Map a [`LifecycleError`] to its HTTP status and error code.
///
/// State-machine rejections are 409s with distinct codes so clients can
/// tell "wrong state" from "busy" from "not stalled".
fn classify_lifecycle_error(err: &LifecycleError) -> (StatusCode, &'static str, String) {
    let message = err.to_string();
    match err {
        LifecycleError::InvalidSourceUrl(_) => {
            (StatusCode::BAD_REQUEST, "INVALID_SOURCE_URL", message)
        }
        LifecycleError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", message),
        LifecycleError::PersistenceFailure(e) => {
            tracing::error!(error = %e, "Article persistence failure");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "PERSISTENCE_FAILURE",
                "The article could not be saved; its status is unchanged".to_string(),
            )
        }
        LifecycleError::GenerationRejected { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "GENERATION_REJECTED",
            message,
        ),
        LifecycleError::InvalidTransition { .. } => {
            (StatusCode::CONFLICT, "INVALID_TRANSITION", message)
        }
        LifecycleError::InProgress { .. } => (StatusCode::CONFLICT, "IN_PROGRESS", message),
        LifecycleError::NotStalled { .. } => (StatusCode::CONFLICT, "NOT_STALLED", message),
        LifecycleError::Collaborator(e) => {
            tracing::warn!(error = %e, "Collaborator failure");
            (StatusCode::BAD_GATEWAY, "COLLABORATOR_FAILURE", message)
        }
        LifecycleError::TaskFailed(e) => {
            tracing::error!(error = %e, "Lifecycle task failed");
            internal()
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
