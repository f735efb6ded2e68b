/**
 * Identity Resolver
 *
 * Maps external (server, form id) pairs onto internal survey identities and
 * caches instances for editing. Stateless apart from the store it wraps;
 * store failures propagate unchanged and nothing is retried here.
 */

use std::sync::Arc;

use super::store::{StoreError, SurveyStore};
use crate::shared::{InstanceIdentity, SurveyKey};

/// Outcome of [`IdentityResolver::upsert`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted {
    pub id: String,
    /// No active identity existed before the call
    pub created: bool,
}

/// Instance data handed to [`IdentityResolver::cache_instance`]
#[derive(Debug, Clone)]
pub struct NewInstance {
    pub instance_id: String,
    pub instance: String,
    pub return_url: Option<String>,
}

#[derive(Clone)]
pub struct IdentityResolver {
    store: Arc<dyn SurveyStore>,
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn SurveyStore>) -> Self {
        Self { store }
    }

    /// Internal id of the active identity for `key`
    pub async fn resolve_existing(&self, key: &SurveyKey) -> Result<Option<String>, StoreError> {
        Ok(self.store.find_active(key).await?.map(|survey| survey.id))
    }

    /// Create or reactivate the identity for `key`
    pub async fn upsert(&self, key: &SurveyKey) -> Result<Upserted, StoreError> {
        let outcome = self.store.upsert(key).await?;
        tracing::debug!(
            "Upserted survey {} for {:?} (previously active: {})",
            outcome.id,
            key,
            outcome.previously_active
        );
        Ok(Upserted {
            id: outcome.id,
            created: !outcome.previously_active,
        })
    }

    /// Mark the identity inactive, whatever its current state
    pub async fn deactivate(&self, key: &SurveyKey) -> Result<Option<String>, StoreError> {
        self.store.set_active(key, false).await
    }

    /// Active identities for a server. Zero is a valid answer.
    pub async fn count_active(&self, server_url: &str) -> Result<u64, StoreError> {
        self.store
            .count_active(&crate::shared::clean_server_url(server_url))
            .await
    }

    /// Cache an instance and resolve its survey
    ///
    /// When the survey has no active identity, or the lookup fails, the
    /// instance row is rolled back to what it was before the call and `None`
    /// (or the error) is returned. No instance is left pointing at a missing
    /// survey and an earlier cached copy survives.
    pub async fn cache_instance(
        &self,
        key: &SurveyKey,
        instance: NewInstance,
    ) -> Result<Option<String>, StoreError> {
        let record = InstanceIdentity {
            instance_id: instance.instance_id,
            open_rosa_server: key.server_url().to_string(),
            open_rosa_id: key.form_id().to_string(),
            instance: instance.instance,
            return_url: instance.return_url,
        };
        let previous = self.store.get_instance(key, &record.instance_id).await?;
        self.store.put_instance(&record).await?;

        match self.resolve_existing(key).await {
            Ok(Some(id)) => Ok(Some(id)),
            Ok(None) => {
                tracing::warn!(
                    "No active survey for {:?}, dropping instance {}",
                    key,
                    record.instance_id
                );
                self.roll_back_instance(key, &record.instance_id, previous)
                    .await?;
                Ok(None)
            }
            Err(e) => {
                if let Err(cleanup) = self
                    .roll_back_instance(key, &record.instance_id, previous)
                    .await
                {
                    tracing::error!(
                        "Failed to roll back instance {} after store error: {}",
                        record.instance_id,
                        cleanup
                    );
                }
                Err(e)
            }
        }
    }

    async fn roll_back_instance(
        &self,
        key: &SurveyKey,
        instance_id: &str,
        previous: Option<InstanceIdentity>,
    ) -> Result<(), StoreError> {
        match previous {
            Some(previous) => self.store.put_instance(&previous).await,
            None => self.store.delete_instance(key, instance_id).await.map(|_| ()),
        }
    }

    pub async fn remove_instance(
        &self,
        key: &SurveyKey,
        instance_id: &str,
    ) -> Result<Option<String>, StoreError> {
        self.store.delete_instance(key, instance_id).await
    }

    /// Cached instance for an active survey, looked up by internal id
    pub async fn instance_for_survey(
        &self,
        survey_id: &str,
        instance_id: &str,
    ) -> Result<Option<InstanceIdentity>, StoreError> {
        let Some(survey) = self.store.find_active_by_id(survey_id).await? else {
            return Ok(None);
        };
        let key = SurveyKey::new(&survey.open_rosa_server, survey.open_rosa_id);
        self.store.get_instance(&key, instance_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::survey::memory::MemoryStore;
    use crate::backend::survey::store::UpsertOutcome;
    use crate::shared::SurveyIdentity;
    use async_trait::async_trait;

    fn resolver() -> (IdentityResolver, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (IdentityResolver::new(store.clone()), store)
    }

    fn key() -> SurveyKey {
        SurveyKey::new("https://kc.example.org/", "widgets")
    }

    fn new_instance(id: &str) -> NewInstance {
        NewInstance {
            instance_id: id.to_string(),
            instance: "<data/>".to_string(),
            return_url: None,
        }
    }

    #[tokio::test]
    async fn test_resolve_after_upsert_returns_same_id() {
        let (resolver, _) = resolver();
        let upserted = resolver.upsert(&key()).await.unwrap();
        assert_eq!(resolver.resolve_existing(&key()).await.unwrap(), Some(upserted.id));
    }

    #[tokio::test]
    async fn test_upsert_created_then_pre_existing() {
        let (resolver, _) = resolver();
        let first = resolver.upsert(&key()).await.unwrap();
        let second = resolver.upsert(&key()).await.unwrap();
        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_deactivate_hides_survey() {
        let (resolver, _) = resolver();
        let id = resolver.upsert(&key()).await.unwrap().id;

        assert_eq!(resolver.deactivate(&key()).await.unwrap(), Some(id));
        assert_eq!(resolver.resolve_existing(&key()).await.unwrap(), None);
        assert_eq!(resolver.count_active("https://kc.example.org").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_deactivate_unknown_survey() {
        let (resolver, _) = resolver();
        assert_eq!(resolver.deactivate(&key()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_count_active_normalises_server() {
        let (resolver, _) = resolver();
        resolver.upsert(&key()).await.unwrap();
        resolver
            .upsert(&SurveyKey::new("https://kc.example.org", "other"))
            .await
            .unwrap();
        assert_eq!(resolver.count_active("http://www.KC.example.org/").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_cache_instance_resolves_survey() {
        let (resolver, store) = resolver();
        let id = resolver.upsert(&key()).await.unwrap().id;

        let cached = resolver.cache_instance(&key(), new_instance("uuid:1")).await.unwrap();
        assert_eq!(cached, Some(id.clone()));
        assert_eq!(store.instance_count().await, 1);

        let instance = resolver.instance_for_survey(&id, "uuid:1").await.unwrap().unwrap();
        assert_eq!(instance.instance, "<data/>");
    }

    #[tokio::test]
    async fn test_cache_instance_without_survey_leaves_nothing() {
        let (resolver, store) = resolver();
        let cached = resolver.cache_instance(&key(), new_instance("uuid:1")).await.unwrap();
        assert_eq!(cached, None);
        assert_eq!(store.instance_count().await, 0);
    }

    #[tokio::test]
    async fn test_remove_missing_instance_is_none() {
        let (resolver, _) = resolver();
        assert_eq!(resolver.remove_instance(&key(), "nope").await.unwrap(), None);
    }

    /// Store whose survey lookups always fail
    struct FailingLookups {
        inner: MemoryStore,
    }

    #[async_trait]
    impl SurveyStore for FailingLookups {
        async fn find_active(&self, _: &SurveyKey) -> Result<Option<SurveyIdentity>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn find_active_by_id(&self, id: &str) -> Result<Option<SurveyIdentity>, StoreError> {
            self.inner.find_active_by_id(id).await
        }
        async fn upsert(&self, key: &SurveyKey) -> Result<UpsertOutcome, StoreError> {
            self.inner.upsert(key).await
        }
        async fn set_active(&self, key: &SurveyKey, active: bool) -> Result<Option<String>, StoreError> {
            self.inner.set_active(key, active).await
        }
        async fn count_active(&self, server_url: &str) -> Result<u64, StoreError> {
            self.inner.count_active(server_url).await
        }
        async fn put_instance(&self, instance: &InstanceIdentity) -> Result<(), StoreError> {
            self.inner.put_instance(instance).await
        }
        async fn get_instance(
            &self,
            key: &SurveyKey,
            instance_id: &str,
        ) -> Result<Option<InstanceIdentity>, StoreError> {
            self.inner.get_instance(key, instance_id).await
        }
        async fn delete_instance(
            &self,
            key: &SurveyKey,
            instance_id: &str,
        ) -> Result<Option<String>, StoreError> {
            self.inner.delete_instance(key, instance_id).await
        }
    }

    #[tokio::test]
    async fn test_cache_instance_store_failure_compensates() {
        let store = Arc::new(FailingLookups { inner: MemoryStore::new() });
        let resolver = IdentityResolver::new(store.clone());

        let result = resolver.cache_instance(&key(), new_instance("uuid:1")).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert_eq!(store.inner.instance_count().await, 0);
    }

    #[tokio::test]
    async fn test_cache_instance_store_failure_keeps_earlier_copy() {
        let store = Arc::new(FailingLookups { inner: MemoryStore::new() });
        let resolver = IdentityResolver::new(store.clone());
        let earlier = InstanceIdentity {
            instance_id: "uuid:1".to_string(),
            open_rosa_server: key().server_url().to_string(),
            open_rosa_id: key().form_id().to_string(),
            instance: "<earlier/>".to_string(),
            return_url: Some("https://kc.example.org/back".to_string()),
        };
        store.inner.put_instance(&earlier).await.unwrap();

        let result = resolver.cache_instance(&key(), new_instance("uuid:1")).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));

        let kept = store.inner.get_instance(&key(), "uuid:1").await.unwrap().unwrap();
        assert_eq!(kept.instance, "<earlier/>");
        assert_eq!(kept.return_url.as_deref(), Some("https://kc.example.org/back"));
    }
}
