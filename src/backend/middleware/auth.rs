/**
 * API Key Middleware
 *
 * Guards every `/api/v1` route. The middleware:
 * 1. Reads the request parameters (query string and body)
 * 2. Looks up the account bound to `server_url`
 * 3. Requires the Basic user name to equal the account's API key
 * 4. Attaches the parsed `ApiRequest` to the request extensions
 *
 * A missing or mismatching key yields 401 with a `WWW-Authenticate`
 * challenge. An unknown server yields 404.
 */

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::backend::api::params::extract_api_request;
use crate::backend::auth::basic_credentials;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

pub async fn api_key_middleware(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let (mut request, api_request) =
        extract_api_request(request, app_state.config.trust_proxy).await?;

    let key = basic_credentials(request.headers()).map(|creds| creds.name);
    let server_url = api_request.params.server_url()?;

    let account = app_state
        .accounts
        .get(server_url)
        .await?
        .ok_or_else(|| {
            tracing::warn!("No account for server {}", server_url);
            BackendError::not_found("Account not found")
        })?;
    tracing::debug!("Account found for {}", account.server_url);

    match key {
        Some(key) if !key.is_empty() && key == account.api_key => {}
        _ => {
            tracing::warn!("Invalid API key for server {}", server_url);
            return Err(BackendError::Unauthorized);
        }
    }

    request.extensions_mut().insert(api_request);
    Ok(next.run(request).await)
}
