//! Shared Error Types
//!
//! This module defines error types that are shared between the webform client
//! and the API backend. These errors represent common failure cases that can
//! occur in both contexts.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - Request or settings validation failures
//!
//! # Usage
//!
//! ```rust
//! use surveyhost::shared::error::SharedError;
//!
//! let error = SharedError::validation("form_id", "Survey information not complete or invalid");
//! ```
use thiserror::Error;

/// Shared error types that can occur in both client and backend
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("{message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_error() {
        let error = SharedError::serialization("Invalid JSON");
        match error {
            SharedError::SerializationError { message } => {
                assert_eq!(message, "Invalid JSON");
            }
            _ => panic!("Expected SerializationError"),
        }
    }

    #[test]
    fn test_validation_error_displays_message_only() {
        let error = SharedError::validation("server_url", "Bad Request. Server URL parameter missing");
        assert_eq!(error.to_string(), "Bad Request. Server URL parameter missing");
        match error {
            SharedError::ValidationError { field, .. } => assert_eq!(field, "server_url"),
            _ => panic!("Expected ValidationError"),
        }
    }

    #[test]
    fn test_from_serde_error() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("{ invalid json }");
        let shared_error: SharedError = result.unwrap_err().into();

        match shared_error {
            SharedError::SerializationError { message } => assert!(message.starts_with("JSON error")),
            _ => panic!("Expected SerializationError from serde error"),
        }
    }
}
