//! Webform client settings
//!
//! Explicit configuration context handed to the webform controller. The
//! controller owns its copy and updates it in place (for example when the
//! server declares a maximum submission size).

use thiserror::Error;

/// Default server URL
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Default login path, relative to the server URL
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Default maximum submission size in bytes
pub const DEFAULT_MAX_SIZE: u64 = 5 * 1024 * 1024;

/// Prefix used in webform URLs in front of the internal survey id
pub const SURVEY_ID_PREFIX: &str = "::";

/// Settings for one webform page
#[derive(Debug, Clone)]
pub struct ClientSettings {
    server_url: String,
    login_path: String,
    enketo_id: String,
    instance_id: Option<String>,
    /// Maximum submission size in bytes
    pub max_size: u64,
}

impl ClientSettings {
    /// Create a new ClientSettingsBuilder
    pub fn builder() -> ClientSettingsBuilder {
        ClientSettingsBuilder::default()
    }

    /// Get the full URL for an endpoint path
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Absolute login URL
    pub fn login_url(&self) -> String {
        self.api_url(&self.login_path)
    }

    /// Internal survey id, without the `::` prefix
    pub fn enketo_id(&self) -> &str {
        &self.enketo_id
    }

    pub fn instance_id(&self) -> Option<&str> {
        self.instance_id.as_deref()
    }
}

/// Builder for ClientSettings
#[derive(Debug, Default)]
pub struct ClientSettingsBuilder {
    server_url: Option<String>,
    login_path: Option<String>,
    enketo_id: Option<String>,
    instance_id: Option<String>,
    max_size: Option<u64>,
}

impl ClientSettingsBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }

    /// Set the survey id. A leading `::` is accepted and stripped.
    pub fn enketo_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        let id = id.strip_prefix(SURVEY_ID_PREFIX).map(str::to_string).unwrap_or(id);
        self.enketo_id = Some(id);
        self
    }

    pub fn instance_id(mut self, id: impl Into<String>) -> Self {
        self.instance_id = Some(id.into());
        self
    }

    pub fn max_size(mut self, bytes: u64) -> Self {
        self.max_size = Some(bytes);
        self
    }

    /// Build the settings
    pub fn build(self) -> Result<ClientSettings, ConfigError> {
        let server_url = self
            .server_url
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        if !(server_url.starts_with("http://") || server_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(server_url));
        }
        let enketo_id = self
            .enketo_id
            .filter(|id| !id.is_empty())
            .ok_or(ConfigError::MissingValue("enketo_id"))?;

        Ok(ClientSettings {
            server_url: server_url.trim_end_matches('/').to_string(),
            login_path: self
                .login_path
                .unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string()),
            enketo_id,
            instance_id: self.instance_id,
            max_size: self.max_size.unwrap_or(DEFAULT_MAX_SIZE),
        })
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
