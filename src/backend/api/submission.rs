//! Webform-facing submission endpoints
//!
//! Unauthenticated reads used by the webform client: the cached instance
//! for an edit webform and the maximum submission size.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::backend::api::handlers::RECORD_NOT_FOUND;
use crate::backend::error::BackendError;
use crate::backend::server::config::ServerConfig;
use crate::backend::survey::IdentityResolver;
use crate::shared::config::SURVEY_ID_PREFIX;
use crate::shared::{ExistingInstance, MaxSizeResponse};

#[derive(Debug, Deserialize)]
pub struct InstanceQuery {
    #[serde(rename = "instanceId")]
    pub instance_id: Option<String>,
}

pub async fn get_existing_instance(
    State(resolver): State<IdentityResolver>,
    Path(enketo_id): Path<String>,
    Query(query): Query<InstanceQuery>,
) -> Result<Json<ExistingInstance>, BackendError> {
    let survey_id = enketo_id
        .strip_prefix(SURVEY_ID_PREFIX)
        .unwrap_or(&enketo_id);
    let Some(instance_id) = query.instance_id.filter(|id| !id.is_empty()) else {
        return Err(BackendError::not_found(RECORD_NOT_FOUND));
    };

    let instance = resolver
        .instance_for_survey(survey_id, &instance_id)
        .await?
        .ok_or_else(|| BackendError::not_found(RECORD_NOT_FOUND))?;

    Ok(Json(ExistingInstance {
        instance: Some(instance.instance),
        instance_attachments: Vec::new(),
    }))
}

pub async fn get_max_size(State(config): State<Arc<ServerConfig>>) -> Json<MaxSizeResponse> {
    Json(MaxSizeResponse {
        max_size: config.max_submission_size,
    })
}
