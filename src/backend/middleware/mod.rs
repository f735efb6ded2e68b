//! Middleware Module
//!
//! HTTP middleware for the API server.
//!
//! - **`auth`** - API key check for the `/api/v1` routes

pub mod auth;

pub use auth::api_key_middleware;
