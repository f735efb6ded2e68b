//! Route Configuration Module
//!
//! Configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs                - Module exports
//! ├── router.rs             - Main router creation
//! ├── api_routes.rs         - `/api/v1` survey and instance routes
//! └── submission_routes.rs  - webform-facing submission routes
//! ```
//!
//! # Route Types
//!
//! ## API Routes (`/api/v1`, API key required)
//!
//! - `/survey`, `/survey/iframe`, `/survey/preview`, `/survey/preview/iframe`, `/survey/all`
//! - `/surveys/number`, `/surveys/list`
//! - `/instance`, `/instance/iframe`
//!
//! ## Submission Routes
//!
//! - `GET /submission/{enketo_id}?instanceId=` - cached instance
//! - `GET /submission/max-size/` - maximum submission size

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

/// Webform submission routes
pub mod submission_routes;

pub use router::create_router;
