//! Test application fixtures

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use base64::{engine::general_purpose::STANDARD, Engine};

use surveyhost::backend::auth::{Account, StaticAccounts};
use surveyhost::backend::routes::create_router;
use surveyhost::backend::server::{AppState, ServerConfig};
use surveyhost::backend::survey::MemoryStore;

pub const SERVER_URL: &str = "https://kc.example.org/enketo";
pub const API_KEY: &str = "abc-api-key";
pub const HOST: &str = "forms.example.org";
pub const MAX_SUBMISSION_SIZE: u64 = 1024 * 1024;

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        max_submission_size: Some(MAX_SUBMISSION_SIZE),
        ..ServerConfig::default()
    }
}

pub fn test_app() -> TestApp {
    test_app_with(test_config())
}

pub fn test_app_with(config: ServerConfig) -> TestApp {
    test_app_with_key(config, API_KEY)
}

/// Test app whose single account is configured with `api_key`
pub fn test_app_with_key(config: ServerConfig, api_key: &str) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let accounts = Arc::new(StaticAccounts::new([Account {
        server_url: SERVER_URL.to_string(),
        api_key: api_key.to_string(),
    }]));
    let state = AppState::new(store.clone(), accounts, config);

    let server = TestServer::new(create_router(state)).expect("Failed to create test server");
    TestApp { server, store }
}

/// `Authorization` header value carrying `key` as the Basic user name
pub fn basic_auth(key: &str) -> HeaderValue {
    let encoded = STANDARD.encode(format!("{key}:"));
    HeaderValue::from_str(&format!("Basic {encoded}")).expect("valid header value")
}

pub trait RequestExt {
    /// Address the request to the public host over https
    fn from_public_host(self) -> Self;

    /// Public host plus the configured API key
    fn authorized(self) -> Self;

    fn api_key(self, key: &str) -> Self;
}

impl RequestExt for TestRequest {
    fn from_public_host(self) -> Self {
        self.add_header(header::HOST, HeaderValue::from_static(HOST))
            .add_header(
                HeaderName::from_static("x-forwarded-proto"),
                HeaderValue::from_static("https"),
            )
    }

    fn authorized(self) -> Self {
        self.from_public_host().api_key(API_KEY)
    }

    fn api_key(self, key: &str) -> Self {
        self.add_header(header::AUTHORIZATION, basic_auth(key))
    }
}

/// Form body identifying a survey of the test account
pub fn survey_form(form_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("server_url", SERVER_URL.to_string()),
        ("form_id", form_id.to_string()),
    ]
}

/// Survey id from a default-mode `url`
pub fn survey_id(url: &str) -> String {
    url.rsplit("::")
        .next()
        .unwrap_or_default()
        .split('?')
        .next()
        .unwrap_or_default()
        .to_string()
}
