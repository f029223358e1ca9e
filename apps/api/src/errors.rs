use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::pipeline::PipelineError;
use crate::sections::TaskError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Model output did not match schema: {0}")]
    SchemaMismatch(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Llm { .. } => AppError::Llm(err.to_string()),
            TaskError::Malformed { .. } => AppError::MalformedOutput(err.to_string()),
            TaskError::Schema { .. } => AppError::SchemaMismatch(err.to_string()),
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Prepare(source) | PipelineError::Branch { source, .. } => source.into(),
            PipelineError::Topology(e) => AppError::Internal(e.into()),
            PipelineError::Panicked(msg) => {
                AppError::Internal(anyhow::anyhow!("branch panicked: {msg}"))
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "The AI model request failed".to_string(),
                )
            }
            AppError::MalformedOutput(msg) => {
                tracing::error!("Malformed model output: {msg}");
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            AppError::SchemaMismatch(msg) => {
                tracing::error!("Schema mismatch: {msg}");
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}
