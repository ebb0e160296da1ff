use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::modules::chat::{ApplicationError, LLMError};

/// JSON error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            error: error.into(),
            detail,
        }
    }
}

fn provider_failure(e: LLMError) -> (StatusCode, ErrorResponse) {
    let retryable = e.is_retryable();
    match e {
        LLMError::ApiError { status, body } => {
            error!(status, retryable, "Provider rejected the completion");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("OpenAI API error", Some(body)),
            )
        }
        e @ LLMError::Timeout { .. } => {
            warn!(retryable, "Completion timed out: {}", e);
            (
                StatusCode::GATEWAY_TIMEOUT,
                ErrorResponse::new("OpenAI API timeout", Some(e.to_string())),
            )
        }
        other => {
            error!(retryable, "Completion failed: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Server error", Some(other.to_string())),
            )
        }
    }
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApplicationError::ValidationError(message) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(message, None))
            }
            ApplicationError::LLMError(e) => provider_failure(e),
            other => {
                error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Server error", Some(other.to_string())),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
