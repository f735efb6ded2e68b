//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the webform client and the API backend. All types are designed for
//! serialization and transmission over HTTP.

/// Shared error types
pub mod error;

/// Webform client settings
pub mod config;

/// Survey and instance identity types, webform URL sets
pub mod survey;

/// Form bundle wire types
pub mod form;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{ClientSettings, ClientSettingsBuilder, ConfigError};
pub use survey::{
    clean_server_url, InstanceIdentity, SurveyIdentity, SurveyKey, UrlOptions, WebformType,
    WebformUrls,
};
pub use form::{ExistingInstance, ExternalData, FormParts, InstanceAttachment, MaxSizeResponse};
