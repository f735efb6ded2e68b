/**
 * Accounts
 *
 * An account links an external form server to the API key it must present.
 * Lookups are keyed by the normalised server URL.
 */

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::backend::survey::StoreError;
use crate::shared::clean_server_url;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub server_url: String,
    pub api_key: String,
}

/// Account lookup collaborator
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Account bound to `server_url`, if any
    async fn get(&self, server_url: &str) -> Result<Option<Account>, StoreError>;
}

#[derive(Debug, Error)]
pub enum AccountsFileError {
    #[error("failed to read accounts file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid accounts file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// `[[account]]` tables of an accounts file
#[derive(Debug, Deserialize)]
struct AccountsFile {
    #[serde(default, rename = "account")]
    accounts: Vec<Account>,
}

/// Fixed set of accounts loaded from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticAccounts {
    accounts: HashMap<String, Account>,
}

impl StaticAccounts {
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            accounts: accounts
                .into_iter()
                .map(|account| (clean_server_url(&account.server_url), account))
                .collect(),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, AccountsFileError> {
        let file: AccountsFile = toml::from_str(contents)?;
        Ok(Self::new(file.accounts))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AccountsFileError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl AccountStore for StaticAccounts {
    async fn get(&self, server_url: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(&clean_server_url(server_url)).cloned())
    }
}
