//! Public routes read by the webform client.

use axum::{routing::get, Router};

use crate::backend::api::submission::{get_existing_instance, get_max_size};
use crate::backend::server::state::AppState;

pub fn configure_submission_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/submission/max-size/", get(get_max_size))
        .route("/submission/max-size", get(get_max_size))
        .route("/submission/{enketo_id}", get(get_existing_instance))
}
