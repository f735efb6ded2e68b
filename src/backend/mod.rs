//! Backend Module
//!
//! Server-side code for the survey API. Only compiled with the `ssr` feature.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Router assembly for `/api/v1` and the submission routes
//! - **`middleware`** - API key check
//! - **`api`** - Parameter extraction, handlers, reply shaping
//! - **`auth`** - Accounts and Basic credentials
//! - **`survey`** - Identity store trait, memory and SQLite stores, resolver
//! - **`webform`** - Webform URL generation
//! - **`error`** - Backend error types and their HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── middleware/     - Request middleware
//! ├── api/            - Request orchestration
//! ├── auth/           - Accounts and credentials
//! ├── survey/         - Identity storage
//! ├── webform/        - URL generation
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the `IdentityResolver` (over an `Arc<dyn SurveyStore>`),
//! the account store and the server configuration. Handlers extract the
//! parts they need through `FromRef`.
//!
//! # Example
//!
//! ```rust,no_run
//! use surveyhost::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() {
//! let app = create_app(ServerConfig::from_env()).await;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//! axum::serve(listener, app).await.unwrap();
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Middleware for request processing
pub mod middleware;

/// Request orchestration
pub mod api;

/// Accounts and API key credentials
pub mod auth;

/// Survey and instance identity storage
pub mod survey;

/// Webform URL generation
pub mod webform;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use server::create_app;
