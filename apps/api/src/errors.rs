use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::carousel::CarouselError;
use crate::llm_client::LlmError;
use crate::optimize::extract::ExtractError;
use crate::optimize::validation::ValidationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `{"error": "<message>"}`; blocked profile fetches
/// additionally carry `"needsPaste": true`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    /// The caller must resubmit with pasted profile text.
    #[error("{0}")]
    NeedsPaste(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream dependency failed. The message is already safe to show.
    #[error("{0}")]
    Upstream(String),

    #[error("Render error: {0}")]
    Render(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, needs_paste) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), false),
            AppError::NeedsPaste(msg) => (StatusCode::BAD_REQUEST, msg.clone(), true),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
                false,
            ),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Server configuration error: {msg}"),
                    false,
                )
            }
            AppError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone(), false),
            AppError::Render(msg) => {
                tracing::error!("Carousel error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone(), false)
            }
        };

        let body = if needs_paste {
            json!({ "error": message, "needsPaste": true })
        } else {
            json!({ "error": message })
        };

        (status, Json(body)).into_response()
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Blocked => AppError::NeedsPaste(err.to_string()),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        tracing::error!("LLM error: {err}");
        AppError::Upstream(err.user_message())
    }
}

impl From<CarouselError> for AppError {
    fn from(err: CarouselError) -> Self {
        AppError::Render(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}
