/**
 * Router Configuration
 *
 * Combines the route groups into the application router.
 *
 * # Route Order
 *
 * 1. API routes nested under `/api/v1` (API key protected)
 * 2. Submission routes for the webform client
 * 3. JSON fallback for unknown paths
 *
 * Requests are traced through `TraceLayer`.
 */

use axum::{http::StatusCode, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::backend::api::reply::ApiReply;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::submission_routes::configure_submission_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Resolver, accounts and configuration shared by handlers
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().nest("/api/v1", configure_api_routes(app_state.clone()));

    let router = configure_submission_routes(router);

    let router = router.fallback(not_found);

    router
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}

async fn not_found() -> ApiReply {
    ApiReply::message(StatusCode::NOT_FOUND, "Not found")
}
