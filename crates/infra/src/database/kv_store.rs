//! SQLite-backed key-value store.
//!
//! Backs the knowledge card cache. Every call borrows a pooled connection on
//! the blocking thread pool so async callers never wait on SQLite directly.

use std::sync::Arc;

use async_trait::async_trait;
use healthprod_core::KeyValueStore;
use healthprod_domain::{HealthProdError, Result};
use rusqlite::{params, OptionalExtension};
use tokio::task;
use tracing::debug;

use super::manager::DbManager;
use crate::errors::conversions::to_domain;

pub struct SqliteKeyValueStore {
    db: Arc<DbManager>,
}

impl SqliteKeyValueStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let db = Arc::clone(&self.db);
        let key = key.to_owned();
        task::spawn_blocking(move || -> Result<Option<String>> {
            let conn = db.get_connection()?;
            conn.query_row("SELECT value FROM kv_store WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .map_err(to_domain)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let db = Arc::clone(&self.db);
        let key = key.to_owned();
        let value = value.to_owned();
        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, CAST(strftime('%s','now') AS INTEGER))
                 ON CONFLICT(key) DO UPDATE
                 SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value],
            )
            .map_err(to_domain)?;
            debug!(%key, "kv entry stored");
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let db = Arc::clone(&self.db);
        let key = key.to_owned();
        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key]).map_err(to_domain)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_join_error(err: task::JoinError) -> HealthProdError {
    if err.is_cancelled() {
        HealthProdError::Internal("blocking kv store task cancelled".into())
    } else {
        HealthProdError::Internal(format!("blocking kv store task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn store() -> (TempDir, SqliteKeyValueStore) {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db = DbManager::new(temp_dir.path().join("kv.db"), 2).expect("manager created");
        db.run_migrations().expect("migrations run");
        (temp_dir, SqliteKeyValueStore::new(Arc::new(db)))
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let (_dir, store) = store();
        assert_eq!(store.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let (_dir, store) = store();
        store.set("healthprod-card-date", "2025-01-01").await.unwrap();
        store.set("healthprod-card-date", "2025-01-02").await.unwrap();

        assert_eq!(store.get("healthprod-card-date").await.unwrap().as_deref(), Some("2025-01-02"));
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let (_dir, store) = store();
        store.set("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn values_survive_reopening_the_database() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kv.db");
        {
            let db = DbManager::new(&path, 1).unwrap();
            db.run_migrations().unwrap();
            SqliteKeyValueStore::new(Arc::new(db)).set("k", "persisted").await.unwrap();
        }

        let db = DbManager::new(&path, 1).unwrap();
        db.run_migrations().unwrap();
        let store = SqliteKeyValueStore::new(Arc::new(db));
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("persisted"));
    }

    #[tokio::test]
    async fn missing_table_surfaces_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let db = DbManager::new(temp_dir.path().join("bare.db"), 1).unwrap();
        let store = SqliteKeyValueStore::new(Arc::new(db));

        let err = store.get("k").await.unwrap_err();
        assert!(matches!(err, HealthProdError::Storage(_)));
    }
}
