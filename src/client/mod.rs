//! Webform Client Module
//!
//! Bootstrap and reinitialization of an edit webform.
//!
//! # Module Structure
//!
//! ```text
//! client/
//! ├── mod.rs         - Module exports
//! ├── error.rs       - ClientError
//! ├── services.rs    - collaborator traits
//! ├── connection.rs  - reqwest FormConnection
//! ├── bundle.rs      - form markup helpers
//! └── webform.rs     - controller
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use surveyhost::client::{FormUpdate, Services, Webform};
//! use surveyhost::shared::ClientSettings;
//!
//! # async fn example(services: Services) -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ClientSettings::builder()
//!     .server_url("https://forms.example.org")
//!     .enketo_id("::abc")
//!     .instance_id("uuid:1")
//!     .build()?;
//!
//! let mut webform = Webform::new(services, settings);
//! webform.bootstrap().await?;
//!
//! let (updates, rx) = tokio::sync::mpsc::channel::<FormUpdate>(8);
//! # drop(updates);
//! webform.run(rx).await;
//! # Ok(())
//! # }
//! ```

pub mod error;

pub mod services;

pub mod connection;

pub mod bundle;

pub mod webform;

pub use connection::HttpConnection;
pub use error::ClientError;
pub use services::{FormConnection, FormEngine, Gui, InitOptions, Translator};
pub use webform::{FormUpdate, NavigationIntent, Services, Webform};
