//! # Key-Value Repository
//!
//! String keys to string values, the only persistence the client needs.
//!
//! ## Batched Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set_many([token, user_role, user_login])                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   SINGLE TRANSACTION                            │   │
//! │  │  INSERT ... ON CONFLICT(key) DO UPDATE   (x3)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT ← all three keys land, or none do                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Keys the session lives under.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const USER_ROLE: &str = "user_role";
    pub const USER_LOGIN: &str = "user_login";

    /// Every session key, in write order.
    pub const SESSION: [&str; 3] = [TOKEN, USER_ROLE, USER_LOGIN];
}

/// On-device key-value persistence.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes every entry as one unit.
    async fn set_many(&self, entries: &[(&str, &str)]) -> StoreResult<()>;

    /// Removes every key as one unit. Missing keys are ignored.
    async fn remove_many(&self, keys: &[&str]) -> StoreResult<()>;
}

// =============================================================================
// SQLite
// =============================================================================

/// Key-value repository over the `kv_store` table.
#[derive(Debug, Clone)]
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteKeyValueStore { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn set_many(&self, entries: &[(&str, &str)]) -> StoreResult<()> {
        let now = Utc::now().to_rfc3339();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::TransactionFailed(e.to_string()))?;

        for (key, value) in entries {
            sqlx::query(
                r#"
                INSERT INTO kv_store (key, value, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(*key)
            .bind(*value)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::TransactionFailed(e.to_string()))?;

        debug!(count = entries.len(), "Stored keys");
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> StoreResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::TransactionFailed(e.to_string()))?;

        for key in keys {
            sqlx::query("DELETE FROM kv_store WHERE key = ?1")
                .bind(*key)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::TransactionFailed(e.to_string()))?;

        debug!(count = keys.len(), "Removed keys");
        Ok(())
    }
}

// =============================================================================
// In-Memory
// =============================================================================

/// Process-local store. Each batch runs under one lock acquisition.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set_many(&self, entries: &[(&str, &str)]) -> StoreResult<()> {
        let mut map = self.entries.lock().await;
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> StoreResult<()> {
        let mut map = self.entries.lock().await;
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn sqlite_store() -> (Database, SqliteKeyValueStore) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = db.key_values();
        (db, store)
    }

    async fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get(keys::TOKEN).await.unwrap(), None);

        store
            .set_many(&[
                (keys::TOKEN, "abc"),
                (keys::USER_ROLE, "USER"),
                (keys::USER_LOGIN, "ana@nextcar.com"),
            ])
            .await
            .unwrap();
        assert_eq!(store.get(keys::TOKEN).await.unwrap().as_deref(), Some("abc"));
        assert_eq!(
            store.get(keys::USER_LOGIN).await.unwrap().as_deref(),
            Some("ana@nextcar.com")
        );

        store.set_many(&[(keys::TOKEN, "xyz")]).await.unwrap();
        assert_eq!(store.get(keys::TOKEN).await.unwrap().as_deref(), Some("xyz"));

        store.remove_many(&keys::SESSION).await.unwrap();
        for key in keys::SESSION {
            assert_eq!(store.get(key).await.unwrap(), None);
        }

        // Removing absent keys is fine.
        store.remove_many(&keys::SESSION).await.unwrap();
    }

    #[tokio::test]
    async fn test_sqlite_store() {
        let (_db, store) = sqlite_store().await;
        exercise(&store).await;
    }

    #[tokio::test]
    async fn test_memory_store() {
        exercise(&MemoryKeyValueStore::new()).await;
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.key_values()
            .set_many(&[(keys::TOKEN, "persisted")])
            .await
            .unwrap();
        db.close().await;

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert_eq!(
            db.key_values().get(keys::TOKEN).await.unwrap().as_deref(),
            Some("persisted")
        );
    }

    #[tokio::test]
    async fn test_closed_pool_reports_error() {
        let (db, store) = sqlite_store().await;
        db.close().await;
        assert!(store.get(keys::TOKEN).await.is_err());
    }
}
