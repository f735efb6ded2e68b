/**
 * Identity Store
 *
 * Persistence seam for survey and instance identities. The resolver only
 * talks to this trait; `MemoryStore` and `SqliteStore` implement it.
 *
 * # Consistency
 *
 * Implementations serialise conflicting writes to the same survey key.
 * `upsert` is atomic: it reports whether an active identity existed before
 * the write in the same step that reactivates or creates it.
 */

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::{InstanceIdentity, SurveyIdentity, SurveyKey};

/// Identity store failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or refused the operation
    #[error("Identity store unavailable: {0}")]
    Unavailable(String),

    /// Database driver error
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Result of an atomic survey upsert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub id: String,
    /// An active identity existed for the key before this write
    pub previously_active: bool,
}

/// Persistence collaborator for survey and instance identities
#[async_trait]
pub trait SurveyStore: Send + Sync {
    /// Active identity for the key, if any
    async fn find_active(&self, key: &SurveyKey) -> Result<Option<SurveyIdentity>, StoreError>;

    /// Active identity by internal id, if any
    async fn find_active_by_id(&self, id: &str) -> Result<Option<SurveyIdentity>, StoreError>;

    /// Create the identity or reactivate (and touch) the existing one
    async fn upsert(&self, key: &SurveyKey) -> Result<UpsertOutcome, StoreError>;

    /// Set the active flag. `None` when no identity exists for the key.
    async fn set_active(&self, key: &SurveyKey, active: bool) -> Result<Option<String>, StoreError>;

    /// Number of active identities for a normalised server URL
    async fn count_active(&self, server_url: &str) -> Result<u64, StoreError>;

    /// Insert or replace a cached instance
    async fn put_instance(&self, instance: &InstanceIdentity) -> Result<(), StoreError>;

    async fn get_instance(
        &self,
        key: &SurveyKey,
        instance_id: &str,
    ) -> Result<Option<InstanceIdentity>, StoreError>;

    /// Remove a cached instance, returning its id when it existed
    async fn delete_instance(
        &self,
        key: &SurveyKey,
        instance_id: &str,
    ) -> Result<Option<String>, StoreError>;
}

/// Generate a new internal survey id
pub fn new_survey_id() -> String {
    Uuid::new_v4().simple().to_string()
}
