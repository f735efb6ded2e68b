/**
 * SQLite Identity Store
 *
 * Durable `SurveyStore` backed by a sqlx SQLite pool. The `(server_url,
 * form_id)` pair carries a UNIQUE constraint; an insert that loses a race
 * against a concurrent first-time upsert falls through to the existing row
 * and is reported as pre-existing.
 */

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use super::store::{new_survey_id, StoreError, SurveyStore, UpsertOutcome};
use crate::shared::{InstanceIdentity, SurveyIdentity, SurveyKey};

#[derive(Debug, sqlx::FromRow)]
struct SurveyRow {
    id: String,
    server_url: String,
    form_id: String,
    active: bool,
}

impl From<SurveyRow> for SurveyIdentity {
    fn from(row: SurveyRow) -> Self {
        Self {
            id: row.id,
            open_rosa_server: row.server_url,
            open_rosa_id: row.form_id,
            active: row.active,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InstanceRow {
    server_url: String,
    form_id: String,
    instance_id: String,
    instance: String,
    return_url: Option<String>,
}

impl From<InstanceRow> for InstanceIdentity {
    fn from(row: InstanceRow) -> Self {
        Self {
            instance_id: row.instance_id,
            open_rosa_server: row.server_url,
            open_rosa_id: row.form_id,
            instance: row.instance,
            return_url: row.return_url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to `database_url` and run migrations
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Self::with_pool(pool).await
    }

    /// Private in-memory database, mainly for tests
    ///
    /// A single connection that never expires, since every SQLite memory
    /// connection owns its own database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::with_pool(pool).await
    }

    pub async fn with_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        tracing::info!("Running identity store migrations...");
        sqlx::migrate!()
            .run(&pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("migration failed: {}", e)))?;
        Ok(Self { pool })
    }

    async fn select_survey(&self, key: &SurveyKey) -> Result<Option<SurveyRow>, sqlx::Error> {
        sqlx::query_as::<_, SurveyRow>(
            r#"
            SELECT id, server_url, form_id, active
            FROM surveys
            WHERE server_url = ? AND form_id = ?
            "#,
        )
        .bind(key.server_url())
        .bind(key.form_id())
        .fetch_optional(&self.pool)
        .await
    }
}

#[async_trait]
impl SurveyStore for SqliteStore {
    async fn find_active(&self, key: &SurveyKey) -> Result<Option<SurveyIdentity>, StoreError> {
        let row = self.select_survey(key).await?;
        Ok(row.filter(|r| r.active).map(Into::into))
    }

    async fn find_active_by_id(&self, id: &str) -> Result<Option<SurveyIdentity>, StoreError> {
        let row = sqlx::query_as::<_, SurveyRow>(
            r#"
            SELECT id, server_url, form_id, active
            FROM surveys
            WHERE id = ? AND active = 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn upsert(&self, key: &SurveyKey) -> Result<UpsertOutcome, StoreError> {
        let now = Utc::now();

        // Single autocommitted statements: a writer waits on the busy timeout
        // instead of deadlocking on a read-to-write lock upgrade.
        let created = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO surveys (id, server_url, form_id, active, created_at, updated_at)
            VALUES (?, ?, ?, 1, ?, ?)
            ON CONFLICT (server_url, form_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(new_survey_id())
        .bind(key.server_url())
        .bind(key.form_id())
        .bind(now)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(id) = created {
            return Ok(UpsertOutcome {
                id,
                previously_active: false,
            });
        }

        let reactivated = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE surveys
            SET active = 1, updated_at = ?
            WHERE server_url = ? AND form_id = ? AND active = 0
            RETURNING id
            "#,
        )
        .bind(now)
        .bind(key.server_url())
        .bind(key.form_id())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(id) = reactivated {
            return Ok(UpsertOutcome {
                id,
                previously_active: false,
            });
        }

        let row = self
            .select_survey(key)
            .await?
            .ok_or_else(|| StoreError::Unavailable("survey vanished during upsert".into()))?;
        Ok(UpsertOutcome {
            id: row.id,
            previously_active: true,
        })
    }

    async fn set_active(&self, key: &SurveyKey, active: bool) -> Result<Option<String>, StoreError> {
        let id = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE surveys
            SET active = ?, updated_at = ?
            WHERE server_url = ? AND form_id = ?
            RETURNING id
            "#,
        )
        .bind(active)
        .bind(Utc::now())
        .bind(key.server_url())
        .bind(key.form_id())
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    async fn count_active(&self, server_url: &str) -> Result<u64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM surveys WHERE server_url = ? AND active = 1",
        )
        .bind(server_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.max(0) as u64)
    }

    async fn put_instance(&self, instance: &InstanceIdentity) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO instances (server_url, form_id, instance_id, instance, return_url, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (server_url, form_id, instance_id) DO UPDATE SET
                instance = excluded.instance,
                return_url = excluded.return_url,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&instance.open_rosa_server)
        .bind(&instance.open_rosa_id)
        .bind(&instance.instance_id)
        .bind(&instance.instance)
        .bind(&instance.return_url)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_instance(
        &self,
        key: &SurveyKey,
        instance_id: &str,
    ) -> Result<Option<InstanceIdentity>, StoreError> {
        let row = sqlx::query_as::<_, InstanceRow>(
            r#"
            SELECT server_url, form_id, instance_id, instance, return_url
            FROM instances
            WHERE server_url = ? AND form_id = ? AND instance_id = ?
            "#,
        )
        .bind(key.server_url())
        .bind(key.form_id())
        .bind(instance_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete_instance(
        &self,
        key: &SurveyKey,
        instance_id: &str,
    ) -> Result<Option<String>, StoreError> {
        let removed = sqlx::query_scalar::<_, String>(
            r#"
            DELETE FROM instances
            WHERE server_url = ? AND form_id = ? AND instance_id = ?
            RETURNING instance_id
            "#,
        )
        .bind(key.server_url())
        .bind(key.form_id())
        .bind(instance_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(key: &SurveyKey, instance_id: &str, xml: &str) -> InstanceIdentity {
        InstanceIdentity {
            instance_id: instance_id.to_string(),
            open_rosa_server: key.server_url().to_string(),
            open_rosa_id: key.form_id().to_string(),
            instance: xml.to_string(),
            return_url: Some("https://kc.example.org/done".to_string()),
        }
    }

    #[tokio::test]
    async fn test_upsert_create_then_existing() {
        let store = SqliteStore::in_memory().await.unwrap();
        let key = SurveyKey::new("https://kc.example.org", "widgets");

        let created = store.upsert(&key).await.unwrap();
        assert!(!created.previously_active);

        let existing = store.upsert(&key).await.unwrap();
        assert!(existing.previously_active);
        assert_eq!(created.id, existing.id);

        let found = store.find_active(&key).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.open_rosa_server, "kc.example.org");
    }

    #[tokio::test]
    async fn test_deactivate_excludes_but_keeps() {
        let store = SqliteStore::in_memory().await.unwrap();
        let key = SurveyKey::new("https://kc.example.org", "widgets");
        let id = store.upsert(&key).await.unwrap().id;

        assert_eq!(store.set_active(&key, false).await.unwrap(), Some(id.clone()));
        assert!(store.find_active(&key).await.unwrap().is_none());
        assert!(store.find_active_by_id(&id).await.unwrap().is_none());
        assert_eq!(store.count_active("kc.example.org").await.unwrap(), 0);

        // deactivating again still finds the record
        assert_eq!(store.set_active(&key, false).await.unwrap(), Some(id));
    }

    #[tokio::test]
    async fn test_set_active_missing_survey() {
        let store = SqliteStore::in_memory().await.unwrap();
        let key = SurveyKey::new("https://kc.example.org", "missing");
        assert_eq!(store.set_active(&key, false).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_instance_put_replaces_and_deletes() {
        let store = SqliteStore::in_memory().await.unwrap();
        let key = SurveyKey::new("https://kc.example.org", "widgets");

        store.put_instance(&instance(&key, "uuid:1", "<a/>")).await.unwrap();
        store.put_instance(&instance(&key, "uuid:1", "<b/>")).await.unwrap();

        let cached = store.get_instance(&key, "uuid:1").await.unwrap().unwrap();
        assert_eq!(cached.instance, "<b/>");

        assert_eq!(
            store.delete_instance(&key, "uuid:1").await.unwrap(),
            Some("uuid:1".to_string())
        );
        assert_eq!(store.delete_instance(&key, "uuid:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_reactivate_reports_created() {
        let store = SqliteStore::in_memory().await.unwrap();
        let key = SurveyKey::new("https://kc.example.org", "widgets");
        let id = store.upsert(&key).await.unwrap().id;
        store.set_active(&key, false).await.unwrap();

        let reactivated = store.upsert(&key).await.unwrap();
        assert_eq!(reactivated.id, id);
        assert!(!reactivated.previously_active);
        assert!(store.upsert(&key).await.unwrap().previously_active);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_upserts_on_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("surveys.db").display());
        let store = SqliteStore::connect(&url).await.unwrap();

        for round in 0..20 {
            let key = SurveyKey::new("https://kc.example.org", format!("form-{round}"));
            let tasks: Vec<_> = (0..5)
                .map(|_| {
                    let store = store.clone();
                    let key = key.clone();
                    tokio::spawn(async move { store.upsert(&key).await })
                })
                .collect();

            let mut outcomes = Vec::new();
            for task in tasks {
                outcomes.push(task.await.unwrap().unwrap());
            }

            let created = outcomes.iter().filter(|o| !o.previously_active).count();
            assert_eq!(created, 1, "round {round}");
            assert!(outcomes.iter().all(|o| o.id == outcomes[0].id));
        }

        assert_eq!(store.count_active("kc.example.org").await.unwrap(), 20);
    }
}
