//! Error types for the relay
//!
//! `AppError` is what handlers return; its `IntoResponse` impl produces the
//! JSON bodies clients see. `UpstreamError` describes what went wrong while
//! talking to the provider and is mapped into `AppError` by each relay
//! strategy.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("prompt is required")]
    PromptRequired,

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("AgenticAI call failed with status {status}")]
    UpstreamStatus { status: StatusCode, body: String },

    #[error("{0}")]
    Internal(String),
}

/// Failures raised while calling the upstream provider
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid completion response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Status { status, body } => AppError::UpstreamStatus { status, body },
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl AppError {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::PromptRequired | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamStatus { status, .. } => *status,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::PromptRequired => ErrorResponse {
                error: "prompt is required".to_string(),
                details: None,
            },
            AppError::InvalidBody(reason) => ErrorResponse {
                error: "invalid request body".to_string(),
                details: Some(reason),
            },
            AppError::UpstreamStatus { body, .. } => ErrorResponse {
                error: "AgenticAI call failed".to_string(),
                details: Some(body),
            },
            AppError::Internal(message) => ErrorResponse {
                error: "internal_error".to_string(),
                details: Some(message),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
