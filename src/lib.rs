//! Surveyhost - Main Library
//!
//! Surveyhost maps forms hosted on external data-collection servers to
//! stable webform identities and launches those webforms in a client.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between server and client
//!   - Survey keys and identities, webform URL options
//!   - Form parts and instance payloads
//!   - Client settings and error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server exposing the `/api/v1` survey API
//!   - API key authentication per data-collection server
//!   - Identity storage (in-memory or SQLite)
//!
//! - **`client`** - Webform bootstrap controller
//!   - Fetches form parts through a `FormConnection`
//!   - Drives a `FormEngine` and a `Gui` through initialization and reloads
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the backend modules and the server binary (default)
//!
//! # Usage
//!
//! ```rust,no_run
//! use surveyhost::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() {
//! let app = create_app(ServerConfig::default()).await;
//! // Use app with axum::serve
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for validation and serialization
//! - `backend::BackendError` for request handling, mapped to HTTP responses
//! - `client::ClientError` for fetch and render failures

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// Webform client controller
pub mod client;
