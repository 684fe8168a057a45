use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// One variant per pipeline failure mode: any step's error is caught at the
/// handler boundary and rendered as a single user-facing message; the pipeline
/// never proceeds past the failing step.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to fetch job posting: {0}")]
    Fetch(String),

    #[error("Chat model call failed: {0}")]
    ModelCall(String),

    #[error("Could not parse model reply: {0}")]
    Parse(String),

    #[error("Embedding call failed: {0}")]
    Embedding(String),

    #[error("Portfolio index is empty — upload a portfolio CSV first")]
    EmptyIndex,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Fetch(msg) => (
                StatusCode::BAD_GATEWAY,
                "FETCH_ERROR",
                format!("Failed to fetch job posting: {msg}"),
            ),
            AppError::ModelCall(msg) => {
                tracing::error!("Chat model error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MODEL_CALL_ERROR",
                    format!("Chat model call failed: {msg}"),
                )
            }
            AppError::Parse(msg) => {
                tracing::error!("Extraction parse error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PARSE_ERROR",
                    format!("Could not parse model reply: {msg}"),
                )
            }
            AppError::Embedding(msg) => {
                tracing::error!("Embedding error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EMBEDDING_ERROR",
                    format!("Embedding call failed: {msg}"),
                )
            }
            AppError::EmptyIndex => (
                StatusCode::CONFLICT,
                "EMPTY_INDEX",
                self.to_string(),
            ),
            AppError::Config(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                format!("Configuration error: {msg}"),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
