/**
 * API Request Parameters
 *
 * Parameters may arrive in the query string or in a form-encoded or JSON
 * body. Body values take precedence over query values. The request origin
 * (protocol and host) is captured alongside so URL assembly needs nothing
 * else from the request.
 */

use axum::{
    body::{to_bytes, Body},
    extract::{Form, FromRequest, Query, Request},
    http::{header, request::Parts, Method},
};
use serde::Deserialize;

use crate::backend::error::BackendError;
use crate::backend::webform::UrlContext;
use crate::shared::{SharedError, SurveyKey, UrlOptions};

/// Upper bound for buffered request bodies
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiParams {
    pub server_url: Option<String>,
    pub form_id: Option<String>,
    pub instance: Option<String>,
    pub instance_id: Option<String>,
    pub return_url: Option<String>,
}

impl ApiParams {
    /// Fill unset values from `fallback`
    pub fn or(self, fallback: ApiParams) -> Self {
        Self {
            server_url: self.server_url.or(fallback.server_url),
            form_id: self.form_id.or(fallback.form_id),
            instance: self.instance.or(fallback.instance),
            instance_id: self.instance_id.or(fallback.instance_id),
            return_url: self.return_url.or(fallback.return_url),
        }
    }

    pub fn server_url(&self) -> Result<&str, SharedError> {
        non_empty(&self.server_url).ok_or_else(|| {
            SharedError::validation("server_url", "Bad Request. Server URL parameter missing")
        })
    }

    /// Survey key from `server_url` and `form_id`
    pub fn survey_key(&self) -> Result<SurveyKey, SharedError> {
        let server_url = self.server_url()?;
        let form_id = non_empty(&self.form_id).ok_or_else(|| {
            SharedError::validation(
                "form_id",
                "Bad Request. Survey information not complete or invalid",
            )
        })?;
        Ok(SurveyKey::new(server_url, form_id))
    }

    pub fn instance_id(&self) -> Result<&str, SharedError> {
        non_empty(&self.instance_id).ok_or_else(instance_incomplete)
    }

    pub fn instance(&self) -> Result<&str, SharedError> {
        non_empty(&self.instance).ok_or_else(instance_incomplete)
    }
}

fn instance_incomplete() -> SharedError {
    SharedError::validation(
        "instance",
        "Bad Request. Instance information not complete or invalid",
    )
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Protocol and host the request was addressed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub protocol: String,
    pub host: String,
}

impl RequestOrigin {
    pub fn from_parts(parts: &Parts, trust_proxy: bool) -> Self {
        let forwarded = trust_proxy
            .then(|| parts.headers.get("x-forwarded-proto"))
            .flatten()
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string());
        let protocol = forwarded
            .or_else(|| parts.uri.scheme_str().map(str::to_string))
            .unwrap_or_else(|| "http".to_string());

        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .unwrap_or_else(|| "localhost".to_string());

        Self { protocol, host }
    }
}

/// Everything the handlers need from an authenticated API request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub params: ApiParams,
    pub origin: RequestOrigin,
}

impl ApiRequest {
    pub fn url_context(&self, options: UrlOptions) -> UrlContext {
        UrlContext {
            protocol: self.origin.protocol.clone(),
            host: self.origin.host.clone(),
            options,
            instance_id: self.params.instance_id.clone(),
        }
    }
}

/// Read parameters from `request`, returning it with its body restored
pub async fn extract_api_request(
    request: Request,
    trust_proxy: bool,
) -> Result<(Request, ApiRequest), BackendError> {
    let (parts, body) = request.into_parts();
    let origin = RequestOrigin::from_parts(&parts, trust_proxy);

    let query = Query::<ApiParams>::try_from_uri(&parts.uri)
        .map(|Query(params)| params)
        .map_err(|e| BackendError::bad_request(format!("Bad Request. {}", e.body_text())))?;

    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| BackendError::bad_request(format!("Bad Request. {}", e)))?;

    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let from_body = if bytes.is_empty() {
        ApiParams::default()
    } else if content_type.starts_with("application/json") {
        serde_json::from_slice::<ApiParams>(&bytes)
            .map_err(|e| BackendError::bad_request(format!("Bad Request. {}", e)))?
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let form_request = Request::builder()
            .method(Method::POST)
            .header(header::CONTENT_TYPE, content_type.as_str())
            .body(Body::from(bytes.clone()))
            .map_err(|e| BackendError::bad_request(format!("Bad Request. {}", e)))?;
        let Form(params) = Form::<ApiParams>::from_request(form_request, &())
            .await
            .map_err(|e| BackendError::bad_request(format!("Bad Request. {}", e.body_text())))?;
        params
    } else {
        ApiParams::default()
    };

    let api_request = ApiRequest {
        params: from_body.or(query),
        origin,
    };
    Ok((Request::from_parts(parts, Body::from(bytes)), api_request))
}
