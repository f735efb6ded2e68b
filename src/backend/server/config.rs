/**
 * Server Configuration
 *
 * Configuration is loaded from environment variables (a `.env` file is
 * read by the binary before this runs), with defaults suitable for local
 * development.
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup. A
 * missing or unreachable database falls back to the in-memory identity
 * store; a missing accounts file leaves the server without accounts.
 */

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::backend::auth::{AccountStore, StaticAccounts};
use crate::backend::survey::{MemoryStore, SqliteStore, SurveyStore};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// SQLite URL for the identity store
    pub database_url: Option<String>,
    /// TOML file with `[[account]]` entries
    pub accounts_file: Option<PathBuf>,
    /// Maximum submission size in bytes announced to webforms
    pub max_submission_size: Option<u64>,
    /// Honour `X-Forwarded-Proto` when building URLs
    pub trust_proxy: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: None,
            accounts_file: None,
            max_submission_size: None,
            trust_proxy: true,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: try_load("SERVER_PORT", defaults.port),
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            accounts_file: env::var("ACCOUNTS_FILE").ok().map(PathBuf::from),
            max_submission_size: env::var("MAX_SUBMISSION_SIZE")
                .ok()
                .and_then(|v| parse_or_warn("MAX_SUBMISSION_SIZE", &v)),
            trust_proxy: try_load("TRUST_PROXY", defaults.trust_proxy),
        }
    }
}

fn try_load<T: FromStr + Display>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) => parse_or_warn(key, &value).unwrap_or(default),
        Err(_) => {
            tracing::info!("{key} not set, using default: {default}");
            default
        }
    }
}

fn parse_or_warn<T: FromStr>(key: &str, value: &str) -> Option<T>
where
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| tracing::warn!("Invalid {key} value {value:?}: {e}"))
        .ok()
}

/// Open the identity store
///
/// Returns the SQLite store when `DATABASE_URL` is set and reachable, the
/// in-memory store otherwise.
pub async fn load_store(config: &ServerConfig) -> Arc<dyn SurveyStore> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set. Survey identities will not survive a restart.");
        return Arc::new(MemoryStore::new());
    };

    tracing::info!("Connecting to identity store...");
    match SqliteStore::connect(database_url).await {
        Ok(store) => {
            tracing::info!("Identity store ready");
            Arc::new(store)
        }
        Err(e) => {
            tracing::error!("Failed to open identity store: {}", e);
            tracing::warn!("Falling back to in-memory identity store.");
            Arc::new(MemoryStore::new())
        }
    }
}

/// Load accounts from `ACCOUNTS_FILE`
pub fn load_accounts(config: &ServerConfig) -> Arc<dyn AccountStore> {
    let Some(path) = &config.accounts_file else {
        tracing::warn!("ACCOUNTS_FILE not set. Every API request will be refused.");
        return Arc::new(StaticAccounts::default());
    };

    match StaticAccounts::from_file(path) {
        Ok(accounts) => {
            tracing::info!("Loaded {} accounts from {}", accounts.len(), path.display());
            Arc::new(accounts)
        }
        Err(e) => {
            tracing::error!("Failed to load accounts from {}: {}", path.display(), e);
            Arc::new(StaticAccounts::default())
        }
    }
}
