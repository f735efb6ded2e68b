//! API response shaping
//!
//! Every response except 204 is a JSON object carrying a `code` field equal
//! to its HTTP status. String bodies become `{message}`. 204 responses have
//! no body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::backend::error::BackendError;

#[derive(Debug, Clone)]
pub struct ApiReply {
    status: StatusCode,
    body: Value,
}

impl ApiReply {
    /// Reply with a serializable object body
    pub fn json(status: StatusCode, body: impl Serialize) -> Result<Self, BackendError> {
        Ok(Self {
            status,
            body: serde_json::to_value(body)?,
        })
    }

    /// Reply with `{message}`
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: Value::String(message.into()),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: Value::Null,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiReply {
    fn into_response(self) -> Response {
        if self.status == StatusCode::NO_CONTENT {
            return StatusCode::NO_CONTENT.into_response();
        }

        let mut body = match self.body {
            Value::Object(map) => map,
            Value::String(message) => {
                let mut map = Map::new();
                map.insert("message".to_string(), Value::String(message));
                map
            }
            _ => Map::new(),
        };
        body.insert("code".to_string(), Value::from(self.status.as_u16()));

        (self.status, Json(Value::Object(body))).into_response()
    }
}
