/**
 * Webform Controller
 *
 * Loads an edit webform and keeps it rendered.
 *
 * # Bootstrap
 *
 * 1. Initialize the translator
 * 2. Fetch form parts and the existing instance concurrently
 * 3. Merge the instance onto the form parts and validate the bundle
 * 4. Swap the theme, build, localize and mount the form
 * 5. Initialize the form engine, then set the page title
 * 6. Apply the server-declared maximum submission size
 *
 * Any failure goes to a single handler: the loader is marked failed, then
 * an unauthorized failure redirects to login and anything else raises an
 * alert.
 *
 * # Reinitialization
 *
 * [`FormUpdate`] messages arrive on an mpsc channel and are processed one
 * at a time by [`Webform::run`]. Each one re-initializes the engine from
 * the form's current record.
 */

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::client::bundle::title_from_form;
use crate::client::error::ClientError;
use crate::client::services::{FormConnection, FormEngine, Gui, InitOptions, Translator};
use crate::shared::{ClientSettings, ExternalData, FormParts, InstanceAttachment};

/// Direction the user was moving when the form was updated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavigationIntent {
    #[default]
    Forward,
    Backward,
}

/// "Form updated" signal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormUpdate {
    pub intent: NavigationIntent,
}

impl FormUpdate {
    pub fn new(intent: NavigationIntent) -> Self {
        Self { intent }
    }
}

/// Validated pieces of the bundle that later reinitializations reuse
#[derive(Debug, Clone)]
struct LoadedForm {
    form: String,
    model: String,
    external_data: Vec<ExternalData>,
}

/// Collaborators used by the controller
#[derive(Clone)]
pub struct Services {
    pub translator: Arc<dyn Translator>,
    pub connection: Arc<dyn FormConnection>,
    pub gui: Arc<dyn Gui>,
    pub engine: Arc<dyn FormEngine>,
}

pub struct Webform {
    services: Services,
    settings: ClientSettings,
    loaded: Option<LoadedForm>,
}

impl Webform {
    pub fn new(services: Services, settings: ClientSettings) -> Self {
        Self {
            services,
            settings,
            loaded: None,
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Load and render the form for the first time
    pub async fn bootstrap(&mut self) -> Result<(), ClientError> {
        match self.load().await {
            Ok(()) => {
                tracing::info!("Webform {} loaded", self.settings.enketo_id());
                Ok(())
            }
            Err(error) => {
                self.show_error_or_authenticate(&error);
                Err(error)
            }
        }
    }

    async fn load(&mut self) -> Result<(), ClientError> {
        let services = self.services.clone();

        services.translator.init(&self.settings).await?;

        let (parts, existing) = tokio::try_join!(
            services.connection.get_form_parts(&self.settings),
            services.connection.get_existing_instance(&self.settings),
        )?;
        let parts = parts.with_instance(existing);

        let (Some(form), Some(model), Some(instance)) =
            (parts.form.clone(), parts.model.clone(), parts.instance.clone())
        else {
            return Err(ClientError::Render(services.translator.t("error.unknown")));
        };

        services.gui.swap_theme(&parts).await?;

        let FormParts {
            external_data,
            instance_attachments,
            ..
        } = parts;
        let loaded = LoadedForm {
            form,
            model,
            external_data,
        };
        self.render(&loaded, instance, instance_attachments).await?;
        self.loaded = Some(loaded);

        if let Some(max_size) = services
            .connection
            .get_maximum_submission_size(&self.settings)
            .await?
        {
            tracing::debug!("Maximum submission size set to {}", max_size);
            self.settings.max_size = max_size;
            services.engine.update_max_size(max_size);
        }

        Ok(())
    }

    async fn render(
        &self,
        loaded: &LoadedForm,
        instance: String,
        instance_attachments: Vec<InstanceAttachment>,
    ) -> Result<(), ClientError> {
        let services = &self.services;

        let markup = services.engine.build_initial_form(&loaded.form)?;
        services
            .gui
            .mount_form(&services.translator.localize(&markup))
            .await?;

        self.init_engine(loaded, instance, instance_attachments).await
    }

    async fn init_engine(
        &self,
        loaded: &LoadedForm,
        instance: String,
        instance_attachments: Vec<InstanceAttachment>,
    ) -> Result<(), ClientError> {
        let load_errors = self
            .services
            .engine
            .init(InitOptions {
                model: loaded.model.clone(),
                instance: Some(instance),
                external: loaded.external_data.clone(),
                instance_attachments,
            })
            .await?;
        for error in load_errors {
            tracing::warn!("Form load error: {}", error);
        }

        if let Some(title) = title_from_form(&loaded.form) {
            self.services.gui.set_title(&title);
        }
        Ok(())
    }

    fn show_error_or_authenticate(&self, error: &ClientError) {
        let gui = &self.services.gui;
        gui.loader_failed();

        if error.is_unauthorized() {
            let return_url = gui.current_location();
            match reqwest::Url::parse_with_params(
                &self.settings.login_url(),
                &[("return_url", return_url.as_str())],
            ) {
                Ok(url) => {
                    tracing::info!("Redirecting to login");
                    gui.redirect(url.as_str());
                    return;
                }
                Err(e) => tracing::error!("Invalid login URL: {}", e),
            }
        }

        tracing::error!("Failed to load webform: {}", error);
        let heading = self.services.translator.t("alert.loaderror.heading");
        gui.alert(&error.to_string(), &heading);
    }

    /// Re-render from the form's current record
    ///
    /// Attachments are not carried over: the engine always receives an
    /// empty attachment list here.
    pub async fn reinitialize(&self, intent: NavigationIntent) -> Result<(), ClientError> {
        let loaded = self
            .loaded
            .as_ref()
            .ok_or_else(|| ClientError::Render("Form is not loaded".to_string()))?;

        let current = self.services.engine.get_current_form()?;
        self.init_engine(loaded, current, Vec::new()).await?;

        if intent == NavigationIntent::Backward {
            self.services.engine.go_to_last_page();
        }
        Ok(())
    }

    /// Process form updates until every sender is dropped
    pub async fn run(&self, mut updates: mpsc::Receiver<FormUpdate>) {
        while let Some(update) = updates.recv().await {
            tracing::debug!("Form updated, moving {:?}", update.intent);
            if let Err(e) = self.reinitialize(update.intent).await {
                tracing::error!("Failed to reinitialize form: {}", e);
            }
        }
    }
}
