use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bookmarks_core::error::CoreError;
use serde_json::json;

/// Body returned for every 401, regardless of why the token was rejected.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized request";

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `bookmarks_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request body was not valid JSON for the expected shape.
    #[error("Invalid JSON body: {0}")]
    Json(#[from] JsonRejection),

    /// A path id that is not a valid bookmark id.
    #[error("Bookmark with id {0} not found")]
    UnknownId(String),

    /// The request path could not be extracted.
    #[error("Invalid path: {0}")]
    Path(#[from] PathRejection),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Unauthorized(reason) => {
                    tracing::warn!(reason = %reason, "Rejected unauthenticated request");
                    return (
                        StatusCode::UNAUTHORIZED,
                        axum::Json(json!({ "error": UNAUTHORIZED_MESSAGE })),
                    )
                        .into_response();
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
                }
            },

            // --- Storage errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::Json(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            AppError::UnknownId(raw) => (
                StatusCode::NOT_FOUND,
                format!("Bookmark with id {raw} not found"),
            ),
            AppError::Path(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        };

        let body = json!({
            "error": { "message": message },
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        other => {
            tracing::error!(error = %other, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
        }
    }
}
