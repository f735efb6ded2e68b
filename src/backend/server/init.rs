/**
 * Server Initialization
 *
 * Builds the application state from configuration and assembles the router.
 *
 * # Initialization Process
 *
 * 1. Open the identity store (SQLite, or in-memory fallback)
 * 2. Load accounts
 * 3. Create the router with all routes and middleware
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_accounts, load_store, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
pub async fn create_app(config: ServerConfig) -> Router<()> {
    tracing::info!("Initializing survey API server");

    let store = load_store(&config).await;
    let accounts = load_accounts(&config);
    let app_state = AppState::new(store, accounts, config);

    let app = create_router(app_state);
    tracing::info!("Router configured");

    app
}
