use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use premises_core::conflict::ConflictReport;
use premises_core::error::CoreError;
use serde_json::json;

use crate::upstream::UpstreamError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `premises_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure talking to the availability API.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// A recognised overlap conflict, ready to redisplay against the form.
    #[error("Conflict: {}", .0.title)]
    Conflict(ConflictReport),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

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
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::InvalidRange(err) => {
                    tracing::error!(error = %err, "Malformed date range reached the classifier");
                    internal()
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Availability API errors ---
            AppError::Upstream(err) => classify_upstream_error(err),

            // --- HTTP-specific errors ---
            AppError::Conflict(report) => {
                let body = json!({
                    "error": report.title,
                    "code": "CONFLICT",
                    "conflict": report,
                });
                return (StatusCode::CONFLICT, axum::Json(body)).into_response();
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
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

/// Classify an availability API error into an HTTP status, error code, and
/// message.
///
/// - `NotFound` maps to 404.
/// - An untranslated conflict maps to 409 with the remote detail.
/// - A remote 400 is passed through as a bad request.
/// - Everything else maps to 502 with a sanitized message.
fn classify_upstream_error(err: &UpstreamError) -> (StatusCode, &'static str, String) {
    match err {
        UpstreamError::NotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        UpstreamError::Conflict { detail } => (StatusCode::CONFLICT, "CONFLICT", detail.clone()),
        UpstreamError::Api { status: 400, body } => {
            (StatusCode::BAD_REQUEST, "BAD_REQUEST", body.clone())
        }
        other => {
            tracing::error!(error = %other, "Availability API error");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "The availability service could not complete the request".to_string(),
            )
        }
    }
}
