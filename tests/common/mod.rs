//! Common test utilities and helpers
//!
//! - Test application with an in-memory store and one account
//! - Request helpers for Basic API key auth
//! - Custom assertion macros

#![allow(dead_code)]

pub mod app;
pub mod assertions;

pub use app::*;
