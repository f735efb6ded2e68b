/**
 * API Routes
 *
 * The authenticated survey API, mounted under `/api/v1`.
 *
 * # Routes
 *
 * ## Survey
 * - `GET|POST|DELETE /survey` - default webform URL
 * - `GET|POST|DELETE /survey/iframe` - iframe webform URL
 * - `GET|POST|DELETE /survey/preview` - preview URL
 * - `GET|POST|DELETE /survey/preview/iframe` - preview iframe URL
 * - `GET|POST|DELETE /survey/all` - every URL plus `subdomain`
 *
 * ## Surveys
 * - `GET|POST /surveys/number` - count of active surveys for a server
 * - `GET|POST /surveys/list` - not implemented
 *
 * ## Instance
 * - `POST|DELETE /instance` - edit URL for a cached instance
 * - `POST|DELETE /instance/iframe` - edit URL with iframe flag
 */

use axum::{
    middleware,
    routing::{get, post, MethodRouter},
    Extension, Router,
};

use crate::backend::api::handlers::{
    cache_instance, deactivate_survey, get_existing_survey, get_list, get_new_or_existing_survey,
    get_number, remove_instance,
};
use crate::backend::middleware::api_key_middleware;
use crate::backend::server::state::AppState;
use crate::shared::{UrlOptions, WebformType};

fn survey_route(options: UrlOptions) -> MethodRouter<AppState> {
    get(get_existing_survey)
        .post(get_new_or_existing_survey)
        .delete(deactivate_survey)
        .layer(Extension(options))
}

fn instance_route(options: UrlOptions) -> MethodRouter<AppState> {
    post(cache_instance)
        .delete(remove_instance)
        .layer(Extension(options))
}

/// Build the `/api/v1` router
///
/// Every route sits behind [`api_key_middleware`], so the handlers can rely
/// on the `ApiRequest` extension being present.
pub fn configure_api_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/survey",
            survey_route(UrlOptions::new(WebformType::Default, false)),
        )
        .route(
            "/survey/iframe",
            survey_route(UrlOptions::new(WebformType::Default, true)),
        )
        .route(
            "/survey/preview",
            survey_route(UrlOptions::new(WebformType::Preview, false)),
        )
        .route(
            "/survey/preview/iframe",
            survey_route(UrlOptions::new(WebformType::Preview, true)),
        )
        .route(
            "/survey/all",
            survey_route(UrlOptions::new(WebformType::All, false)),
        )
        .route("/surveys/number", get(get_number).post(get_number))
        .route("/surveys/list", get(get_list).post(get_list))
        .route(
            "/instance",
            instance_route(UrlOptions::new(WebformType::Edit, false)),
        )
        .route(
            "/instance/iframe",
            instance_route(UrlOptions::new(WebformType::Edit, true)),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state,
            api_key_middleware,
        ))
}
