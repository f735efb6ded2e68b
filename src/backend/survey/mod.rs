//! Survey Identity Module
//!
//! Survey and instance identity resolution on top of a pluggable store.
//!
//! # Module Structure
//!
//! ```text
//! survey/
//! ├── mod.rs        - Module exports
//! ├── store.rs      - SurveyStore trait and StoreError
//! ├── memory.rs     - In-memory store
//! ├── sqlite.rs     - SQLite store (sqlx)
//! └── resolver.rs   - IdentityResolver
//! ```

pub mod store;

pub mod memory;

pub mod sqlite;

pub mod resolver;

pub use memory::MemoryStore;
pub use resolver::{IdentityResolver, NewInstance, Upserted};
pub use sqlite::SqliteStore;
pub use store::{StoreError, SurveyStore, UpsertOutcome};
