//! libSQL backend: async `BlobStore` over a single `containers` table.
//!
//! Supports local file and in-memory databases.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::store::migrations;
use crate::store::traits::BlobStore;

/// libSQL blob store.
///
/// Stores a single connection that is reused for all operations.
pub struct LibSqlStore {
    conn: Connection,
}

impl LibSqlStore {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let store = Self::from_database(db)?;
        migrations::run_migrations(&store.conn).await?;
        info!(path = %path.display(), "Store opened");
        Ok(store)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StoreError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| StoreError::Pool(format!("Failed to create in-memory database: {e}")))?;

        let store = Self::from_database(db)?;
        migrations::run_migrations(&store.conn).await?;
        Ok(store)
    }

    fn from_database(db: LibSqlDatabase) -> Result<Self, StoreError> {
        let conn = db
            .connect()
            .map_err(|e| StoreError::Pool(format!("Failed to create connection: {e}")))?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl BlobStore for LibSqlStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let mut rows = self
            .conn
            .query("SELECT value FROM containers WHERE key = ?1", params![key])
            .await
            .map_err(|e| StoreError::Query(format!("get: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let raw: String = row
                    .get(0)
                    .map_err(|e| StoreError::Query(format!("get: {e}")))?;
                let value = serde_json::from_str(&raw).map_err(|e| StoreError::Serialization {
                    key: key.to_string(),
                    reason: e.to_string(),
                })?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Query(format!("get: {e}"))),
        }
    }

    async fn put(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        let raw = serde_json::to_string(value).map_err(|e| StoreError::Serialization {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        self.conn
            .execute(
                "INSERT INTO containers (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT (key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![key, raw, now],
            )
            .await
            .map_err(|e| StoreError::Query(format!("put: {e}")))?;

        debug!(key, "Container written");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let count = self
            .conn
            .execute("DELETE FROM containers WHERE key = ?1", params![key])
            .await
            .map_err(|e| StoreError::Query(format!("delete: {e}")))?;
        Ok(count > 0)
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut rows = self
            .conn
            .query("SELECT key FROM containers ORDER BY key", ())
            .await
            .map_err(|e| StoreError::Query(format!("keys: {e}")))?;

        let mut keys = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| StoreError::Query(format!("keys: {e}")))?
        {
            let key: String = row
                .get(0)
                .map_err(|e| StoreError::Query(format!("keys: {e}")))?;
            keys.push(key);
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn roundtrip_in_memory() {
        let store = LibSqlStore::new_memory().await.unwrap();
        assert!(store.get("cardio").await.unwrap().is_none());

        let value = serde_json::json!({"profile": null, "sessions": []});
        store.put("cardio", &value).await.unwrap();
        assert_eq!(store.get("cardio").await.unwrap(), Some(value));
    }

    #[tokio::test]
    async fn put_replaces_whole_value() {
        let store = LibSqlStore::new_memory().await.unwrap();
        store.put("app", &serde_json::json!({"a": 1})).await.unwrap();
        store.put("app", &serde_json::json!({"b": 2})).await.unwrap();
        let value = store.get("app").await.unwrap().unwrap();
        assert!(value.get("a").is_none());
        assert_eq!(value["b"], 2);
    }

    #[tokio::test]
    async fn delete_and_keys() {
        let store = LibSqlStore::new_memory().await.unwrap();
        store.put("steps", &serde_json::json!({})).await.unwrap();
        store.put("app", &serde_json::json!({})).await.unwrap();
        assert_eq!(store.keys().await.unwrap(), vec!["app", "steps"]);
        assert!(store.delete("steps").await.unwrap());
        assert!(!store.delete("steps").await.unwrap());
        assert_eq!(store.keys().await.unwrap(), vec!["app"]);
    }

    #[tokio::test]
    async fn survives_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("fittrack.db");
        {
            let store = LibSqlStore::new_local(&path).await.unwrap();
            store
                .put("sleep", &serde_json::json!({"profile": {"bedtime": "23:00"}}))
                .await
                .unwrap();
        }
        let store = LibSqlStore::new_local(&path).await.unwrap();
        let value = store.get("sleep").await.unwrap().unwrap();
        assert_eq!(value["profile"]["bedtime"], "23:00");
    }
}
