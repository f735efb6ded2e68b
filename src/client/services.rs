/**
 * Webform Collaborators
 *
 * The controller drives four collaborators it treats as black boxes:
 *
 * - [`Translator`] - language bundle and string lookup
 * - [`FormConnection`] - form parts, existing instance, submission limit
 * - [`Gui`] - page chrome (theme, mounting, title, dialogs, navigation)
 * - [`FormEngine`] - the form renderer
 *
 * Collaborators take `&self`; implementations that hold page state use
 * interior mutability.
 */

use async_trait::async_trait;

use crate::client::error::ClientError;
use crate::shared::{ClientSettings, ExistingInstance, ExternalData, FormParts, InstanceAttachment};

#[async_trait]
pub trait Translator: Send + Sync {
    /// Load the language bundle for this page
    async fn init(&self, settings: &ClientSettings) -> Result<(), ClientError>;

    /// Translate a key
    fn t(&self, key: &str) -> String;

    /// Localize form markup
    fn localize(&self, markup: &str) -> String;
}

#[async_trait]
pub trait FormConnection: Send + Sync {
    async fn get_form_parts(&self, settings: &ClientSettings) -> Result<FormParts, ClientError>;

    async fn get_existing_instance(
        &self,
        settings: &ClientSettings,
    ) -> Result<ExistingInstance, ClientError>;

    /// Maximum submission size declared by the server, in bytes
    async fn get_maximum_submission_size(
        &self,
        settings: &ClientSettings,
    ) -> Result<Option<u64>, ClientError>;
}

#[async_trait]
pub trait Gui: Send + Sync {
    /// Apply the theme named by the form parts
    async fn swap_theme(&self, parts: &FormParts) -> Result<(), ClientError>;

    /// Insert the form markup into the page
    async fn mount_form(&self, markup: &str) -> Result<(), ClientError>;

    fn set_title(&self, title: &str);

    fn alert(&self, message: &str, heading: &str);

    fn redirect(&self, url: &str);

    /// Mark the loading indicator as failed
    fn loader_failed(&self);

    /// Current page location, used as the login return URL
    fn current_location(&self) -> String;
}

/// Arguments for [`FormEngine::init`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitOptions {
    pub model: String,
    pub instance: Option<String>,
    pub external: Vec<ExternalData>,
    pub instance_attachments: Vec<InstanceAttachment>,
}

#[async_trait]
pub trait FormEngine: Send + Sync {
    /// Build the initial form markup from the transformed form
    fn build_initial_form(&self, form: &str) -> Result<String, ClientError>;

    /// Initialize the mounted form. Returns non-fatal load errors.
    async fn init(&self, options: InitOptions) -> Result<Vec<String>, ClientError>;

    /// Serialized record currently held by the form
    fn get_current_form(&self) -> Result<String, ClientError>;

    fn go_to_last_page(&self);

    fn update_max_size(&self, max_size: u64);
}
