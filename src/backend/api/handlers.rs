/**
 * Survey and Instance API Handlers
 *
 * Each handler runs after the API key middleware has authenticated the
 * request and attached its `ApiRequest`. Handlers resolve the identity,
 * assemble the URLs for the route's `UrlOptions` and shape the reply.
 *
 * # Status Codes
 *
 * - `GET survey` - 200, or 404 when no active survey exists
 * - `POST survey` - 201 when created (or reactivated), 200 when it was active
 * - `DELETE survey` - 204, or 404
 * - `surveys/number` - 200 `{code, number}`, zero included
 * - `surveys/list` - 500, not implemented
 * - `POST instance` - 201 with the edit URL, or 404 without an active survey
 * - `DELETE instance` - 204, or 404
 */

use axum::{extract::State, http::StatusCode, Extension};
use serde_json::json;

use crate::backend::api::params::ApiRequest;
use crate::backend::api::reply::ApiReply;
use crate::backend::error::BackendError;
use crate::backend::survey::{IdentityResolver, NewInstance};
use crate::backend::webform::generate_webform_urls;
use crate::shared::UrlOptions;

pub const SURVEY_NOT_FOUND: &str = "Survey not found";
pub const RECORD_NOT_FOUND: &str = "Record not found";
pub const NOT_IMPLEMENTED: &str = "This API point is not implemented yet";

fn urls_reply(
    status: StatusCode,
    id: &str,
    api: &ApiRequest,
    options: UrlOptions,
) -> Result<ApiReply, BackendError> {
    let urls = generate_webform_urls(id, &api.url_context(options));
    tracing::debug!("Webform URLs for {}: {:?}", id, urls);
    ApiReply::json(status, urls)
}

pub async fn get_existing_survey(
    State(resolver): State<IdentityResolver>,
    Extension(api): Extension<ApiRequest>,
    Extension(options): Extension<UrlOptions>,
) -> Result<ApiReply, BackendError> {
    let key = api.params.survey_key()?;
    let id = resolver
        .resolve_existing(&key)
        .await?
        .ok_or_else(|| BackendError::not_found(SURVEY_NOT_FOUND))?;

    urls_reply(StatusCode::OK, &id, &api, options)
}

pub async fn get_new_or_existing_survey(
    State(resolver): State<IdentityResolver>,
    Extension(api): Extension<ApiRequest>,
    Extension(options): Extension<UrlOptions>,
) -> Result<ApiReply, BackendError> {
    let key = api.params.survey_key()?;
    let upserted = resolver.upsert(&key).await?;
    let status = if upserted.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    urls_reply(status, &upserted.id, &api, options)
}

pub async fn deactivate_survey(
    State(resolver): State<IdentityResolver>,
    Extension(api): Extension<ApiRequest>,
) -> Result<ApiReply, BackendError> {
    let key = api.params.survey_key()?;
    match resolver.deactivate(&key).await? {
        Some(id) => {
            tracing::info!("Deactivated survey {}", id);
            Ok(ApiReply::no_content())
        }
        None => Err(BackendError::not_found(SURVEY_NOT_FOUND)),
    }
}

pub async fn get_number(
    State(resolver): State<IdentityResolver>,
    Extension(api): Extension<ApiRequest>,
) -> Result<ApiReply, BackendError> {
    let number = resolver.count_active(api.params.server_url()?).await?;
    ApiReply::json(StatusCode::OK, json!({ "number": number }))
}

pub async fn get_list() -> Result<ApiReply, BackendError> {
    Err(BackendError::NotImplemented(NOT_IMPLEMENTED.to_string()))
}

pub async fn cache_instance(
    State(resolver): State<IdentityResolver>,
    Extension(api): Extension<ApiRequest>,
    Extension(options): Extension<UrlOptions>,
) -> Result<ApiReply, BackendError> {
    let key = api.params.survey_key()?;
    let instance = NewInstance {
        instance_id: api.params.instance_id()?.to_string(),
        instance: api.params.instance()?.to_string(),
        return_url: api.params.return_url.clone(),
    };

    let id = resolver
        .cache_instance(&key, instance)
        .await?
        .ok_or_else(|| BackendError::not_found(SURVEY_NOT_FOUND))?;

    urls_reply(StatusCode::CREATED, &id, &api, options)
}

pub async fn remove_instance(
    State(resolver): State<IdentityResolver>,
    Extension(api): Extension<ApiRequest>,
) -> Result<ApiReply, BackendError> {
    let key = api.params.survey_key()?;
    let instance_id = api.params.instance_id()?;

    match resolver.remove_instance(&key, instance_id).await? {
        Some(_) => Ok(ApiReply::no_content()),
        None => Err(BackendError::not_found(RECORD_NOT_FOUND)),
    }
}
