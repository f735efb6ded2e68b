//! Survey identity types
//!
//! Types describing a survey hosted on an external form server, the webform
//! rendering modes and the URL sets handed back to API consumers.

use serde::{Deserialize, Serialize};

/// Requested rendering mode for generated webform URLs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebformType {
    #[default]
    Default,
    Preview,
    Edit,
    All,
}

/// Per-route URL options
///
/// Routes attach one of these to every request. `webform_type` falls back to
/// [`WebformType::Default`] at construction so the value is always set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlOptions {
    pub webform_type: WebformType,
    pub iframe: bool,
}

impl UrlOptions {
    pub fn new(webform_type: WebformType, iframe: bool) -> Self {
        Self { webform_type, iframe }
    }

    pub fn iframe(mut self) -> Self {
        self.iframe = true;
        self
    }
}

/// Webform URLs returned by the survey and instance endpoints
///
/// Key names are part of the public API. Only the keys belonging to the
/// requested [`WebformType`] are serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebformUrls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iframe_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_iframe_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<String>,
    /// Always empty, kept for API consumers that still read it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
}

/// Key of a survey identity: external server + form id on that server
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurveyKey {
    server_url: String,
    form_id: String,
}

impl SurveyKey {
    /// Build a key, normalising the server URL
    pub fn new(server_url: &str, form_id: impl Into<String>) -> Self {
        Self {
            server_url: clean_server_url(server_url),
            form_id: form_id.into(),
        }
    }

    /// Normalised server URL
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }
}

/// Durable survey identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyIdentity {
    pub id: String,
    pub open_rosa_server: String,
    pub open_rosa_id: String,
    pub active: bool,
}

/// Cached instance awaiting edit in a webform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceIdentity {
    pub instance_id: String,
    /// Normalised server URL of the owning survey
    pub open_rosa_server: String,
    pub open_rosa_id: String,
    pub instance: String,
    pub return_url: Option<String>,
}

/// Normalise a form server URL for use as a lookup key
///
/// Trims whitespace, strips the scheme, a leading `www.` and trailing
/// slashes, and lower-cases the remainder.
pub fn clean_server_url(url: &str) -> String {
    let url = url.trim();
    let url = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let url = url.strip_prefix("www.").unwrap_or(url);
    url.trim_end_matches('/').to_lowercase()
}
