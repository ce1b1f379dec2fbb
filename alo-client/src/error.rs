//! Client error types

use serde::Deserialize;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Structured error returned by the service
    #[error("API error {code}: {message}")]
    Api {
        code: i32,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Error body the service sends with non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ClientError {
    /// Map a failed response to an error: structured body first, status code otherwise
    pub(crate) fn from_status(status: http::StatusCode, text: String) -> Self {
        if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&text) {
            return ClientError::Api {
                code: api_err.code,
                message: api_err.message,
                details: api_err.details,
            };
        }
        match status {
            http::StatusCode::UNAUTHORIZED => ClientError::Unauthorized(text),
            http::StatusCode::FORBIDDEN => ClientError::Forbidden(text),
            http::StatusCode::NOT_FOUND => ClientError::NotFound(text),
            http::StatusCode::BAD_REQUEST => ClientError::Validation(text),
            _ => ClientError::Internal(format!("{}: {}", status, text)),
        }
    }
}
