//! Backend Error Module
//!
//! This module defines error types specific to the API server.
//! These errors are returned from handlers and middleware and converted to
//! JSON HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, AUTHENTICATE_CHALLENGE};
