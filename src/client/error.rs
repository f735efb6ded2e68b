//! Client error types

use thiserror::Error;

/// Failures surfaced by the webform controller
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network, HTTP status or payload failure while fetching from a service
    #[error("{message}")]
    Fetch {
        status: Option<u16>,
        message: String,
    },

    /// The loaded bundle cannot be rendered
    #[error("{0}")]
    Render(String),
}

impl ClientError {
    pub fn fetch(status: Option<u16>, message: impl Into<String>) -> Self {
        ClientError::Fetch {
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by the failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Fetch { status, .. } => *status,
            ClientError::Render(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::Fetch {
            status: error.status().map(|status| status.as_u16()),
            message: error.to_string(),
        }
    }
}
