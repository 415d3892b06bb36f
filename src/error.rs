use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

use crate::services::llm::LlmError;

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No language model is configured (missing API key).
    #[error("OpenAI API key is not configured; set OPENAI_API_KEY in the environment or .env file")]
    AiUnavailable,
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// The model replied with something that is not the expected JSON.
    #[error("AI response parse error: {0}")]
    AiResponse(String),
    /// The completion request itself failed.
    #[error("AI generation error")]
    AiGeneration(#[source] LlmError),
    /// A project template failed to render.
    #[error("template rendering failed")]
    Render(#[from] askama::Error),
}

impl From<LlmError> for ServiceError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey => ServiceError::AiUnavailable,
            LlmError::MalformedJson { source, .. } => ServiceError::AiResponse(source.to_string()),
            LlmError::EmptyCompletion => ServiceError::AiResponse("empty completion".into()),
            other => ServiceError::AiGeneration(other),
        }
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// A required upstream service is not configured.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::AiUnavailable => AppError::ServiceUnavailable(err.to_string()),
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::AiResponse(_) => AppError::Internal(err.to_string()),
            ServiceError::AiGeneration(ref source) => {
                AppError::Internal(format!("{err}: {source}"))
            }
            ServiceError::Render(ref source) => AppError::Internal(format!("{err}: {source}")),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}
