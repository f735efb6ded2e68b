//! Authentication Module
//!
//! API consumers authenticate with HTTP Basic credentials whose user name is
//! the API key of the account bound to the `server_url` they act for.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs       - Module exports and documentation
//! ├── accounts.rs  - Account model and lookup
//! └── basic.rs     - Basic credential parsing
//! ```
//!
//! The check itself runs in `backend::middleware::auth`.

/// Account model and lookup
pub mod accounts;

/// HTTP Basic credential parsing
pub mod basic;

pub use accounts::{Account, AccountStore, AccountsFileError, StaticAccounts};
pub use basic::{basic_credentials, BasicCredentials};
