/**
 * Backend Error Types
 *
 * This module defines error types specific to the API server.
 * Every variant maps to an HTTP status and renders as a JSON
 * `{code, message}` body.
 *
 * # Error Categories
 *
 * - `Unauthorized` - missing or invalid API key (401)
 * - `NotFound` - survey, instance or account absent (404)
 * - `NotImplemented` - stub endpoints (500)
 * - `BadRequest` - incomplete request parameters (400)
 * - `Store` - identity store unavailable (500)
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::survey::StoreError;
use crate::shared::SharedError;

/// Challenge sent with every 401 response
pub const AUTHENTICATE_CHALLENGE: &str = "Basic realm=\"Enter valid API key as user name\"";

#[derive(Debug, Error)]
pub enum BackendError {
    /// Missing or mismatching API key
    #[error("Not Allowed. Invalid API key.")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    NotImplemented(String),

    #[error("{0}")]
    BadRequest(String),

    /// Identity store failure, propagated unchanged
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Unauthorized` - 401 Unauthorized
    /// - `NotFound` - 404 Not Found
    /// - `BadRequest` - 400 Bad Request
    /// - `SharedError` - 400 for validation, 500 otherwise
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotImplemented(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}
