//! API Module
//!
//! Request orchestration for the survey API: parameter extraction, handlers
//! and response shaping.
//!
//! # Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs         - Module exports
//! ├── params.rs      - ApiParams / ApiRequest extraction
//! ├── handlers.rs    - survey, surveys and instance handlers
//! ├── submission.rs  - webform-facing instance and max-size reads
//! └── reply.rs       - JSON reply shaping
//! ```

pub mod params;

pub mod handlers;

pub mod submission;

pub mod reply;

pub use params::{ApiParams, ApiRequest, RequestOrigin};
pub use reply::ApiReply;
