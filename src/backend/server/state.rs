/**
 * Application State Management
 *
 * `AppState` is the central state container shared by all handlers. It
 * holds no per-request mutable state: the identity store behind the
 * resolver is the only shared resource.
 *
 * The `FromRef` implementations let handlers extract just the part they
 * need, following Axum's recommended pattern.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::AccountStore;
use crate::backend::server::config::ServerConfig;
use crate::backend::survey::{IdentityResolver, SurveyStore};

#[derive(Clone)]
pub struct AppState {
    /// Survey and instance identity resolution
    pub resolver: IdentityResolver,

    /// Account lookup for API key checks
    pub accounts: Arc<dyn AccountStore>,

    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn SurveyStore>,
        accounts: Arc<dyn AccountStore>,
        config: ServerConfig,
    ) -> Self {
        Self {
            resolver: IdentityResolver::new(store),
            accounts,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for IdentityResolver {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.resolver.clone()
    }
}

impl FromRef<AppState> for Arc<dyn AccountStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.accounts.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
