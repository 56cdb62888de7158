use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use recwatch_core::error::CoreError;
use recwatch_upstream::UpstreamError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`], storage and upstream errors and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses of the form `{ "error", "code", "detail"? }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `recwatch_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The facility-count API could not be used.
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, detail) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
                }
                CoreError::ConfigurationMissing(var) => {
                    tracing::error!(var, "Storage requested but not configured");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "CONFIGURATION_MISSING",
                        format!("{var} is not set; storage is unavailable"),
                        None,
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Upstream errors ---
            AppError::Upstream(err) => {
                tracing::warn!(error = %err, "Upstream fetch failed");
                let (code, message) = if err.is_malformed() {
                    ("UPSTREAM_MALFORMED", "Upstream returned an unexpected response")
                } else {
                    ("UPSTREAM_UNAVAILABLE", "Upstream API is unavailable")
                };
                (
                    StatusCode::BAD_GATEWAY,
                    code,
                    message.to_string(),
                    Some(err.to_string()),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(detail) = detail {
            body["detail"] = json!(detail);
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, message and detail.
///
/// - Pool exhaustion and connection-level failures map to 503.
/// - Everything else maps to 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String, Option<String>) {
    tracing::error!(error = %err, "Database error");
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "STORAGE_UNAVAILABLE",
            "Storage is unreachable".to_string(),
            Some(err.to_string()),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "STORAGE_ERROR",
            "Storage operation failed".to_string(),
            Some(other.to_string()),
        ),
    }
}
