/**
 * Error Conversion
 *
 * `IntoResponse` for backend errors. Error responses are JSON objects:
 * ```json
 * {
 *   "code": 404,
 *   "message": "Survey not found"
 * }
 * ```
 * 401 responses also carry the `WWW-Authenticate` challenge.
 */

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::backend::api::reply::ApiReply;
use crate::backend::error::types::{BackendError, AUTHENTICATE_CHALLENGE};

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected with {}: {}", status, self);
        }

        let mut response = ApiReply::message(status, self.message()).into_response();
        if matches!(self, BackendError::Unauthorized) {
            response.headers_mut().insert(
                WWW_AUTHENTICATE,
                HeaderValue::from_static(AUTHENTICATE_CHALLENGE),
            );
        }
        response
    }
}
