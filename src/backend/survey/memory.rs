//! In-memory identity store
//!
//! Used when no database is configured, and by tests. All state sits behind
//! a single `RwLock`, so every write is serialised.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{new_survey_id, StoreError, SurveyStore, UpsertOutcome};
use crate::shared::{InstanceIdentity, SurveyIdentity, SurveyKey};

#[derive(Debug, Default)]
struct MemoryState {
    surveys: HashMap<SurveyKey, SurveyIdentity>,
    instances: HashMap<(SurveyKey, String), InstanceIdentity>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached instances, active surveys or not
    pub async fn instance_count(&self) -> usize {
        self.state.read().await.instances.len()
    }
}

#[async_trait]
impl SurveyStore for MemoryStore {
    async fn find_active(&self, key: &SurveyKey) -> Result<Option<SurveyIdentity>, StoreError> {
        let state = self.state.read().await;
        Ok(state.surveys.get(key).filter(|s| s.active).cloned())
    }

    async fn find_active_by_id(&self, id: &str) -> Result<Option<SurveyIdentity>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .surveys
            .values()
            .find(|s| s.active && s.id == id)
            .cloned())
    }

    async fn upsert(&self, key: &SurveyKey) -> Result<UpsertOutcome, StoreError> {
        let mut state = self.state.write().await;
        let survey = state.surveys.entry(key.clone()).or_insert_with(|| SurveyIdentity {
            id: new_survey_id(),
            open_rosa_server: key.server_url().to_string(),
            open_rosa_id: key.form_id().to_string(),
            active: false,
        });
        let previously_active = survey.active;
        survey.active = true;

        Ok(UpsertOutcome {
            id: survey.id.clone(),
            previously_active,
        })
    }

    async fn set_active(&self, key: &SurveyKey, active: bool) -> Result<Option<String>, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.surveys.get_mut(key).map(|survey| {
            survey.active = active;
            survey.id.clone()
        }))
    }

    async fn count_active(&self, server_url: &str) -> Result<u64, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .surveys
            .values()
            .filter(|s| s.active && s.open_rosa_server == server_url)
            .count() as u64)
    }

    async fn put_instance(&self, instance: &InstanceIdentity) -> Result<(), StoreError> {
        let key = SurveyKey::new(&instance.open_rosa_server, instance.open_rosa_id.clone());
        let mut state = self.state.write().await;
        state
            .instances
            .insert((key, instance.instance_id.clone()), instance.clone());
        Ok(())
    }

    async fn get_instance(
        &self,
        key: &SurveyKey,
        instance_id: &str,
    ) -> Result<Option<InstanceIdentity>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .instances
            .get(&(key.clone(), instance_id.to_string()))
            .cloned())
    }

    async fn delete_instance(
        &self,
        key: &SurveyKey,
        instance_id: &str,
    ) -> Result<Option<String>, StoreError> {
        let mut state = self.state.write().await;
        Ok(state
            .instances
            .remove(&(key.clone(), instance_id.to_string()))
            .map(|instance| instance.instance_id))
    }
}
