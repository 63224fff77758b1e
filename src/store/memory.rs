//! In-memory `BlobStore` for tests and ephemeral sessions.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::traits::BlobStore;

#[derive(Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        self.blobs
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.blobs.write().await.remove(key).is_some())
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.blobs.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_delete() {
        let store = MemoryStore::new();
        assert!(store.get("app").await.unwrap().is_none());

        store.put("app", &serde_json::json!({"screen": "main"})).await.unwrap();
        let value = store.get("app").await.unwrap().unwrap();
        assert_eq!(value["screen"], "main");

        assert!(store.delete("app").await.unwrap());
        assert!(!store.delete("app").await.unwrap());
    }

    #[tokio::test]
    async fn keys_are_sorted() {
        let store = MemoryStore::new();
        store.put("sleep", &serde_json::json!({})).await.unwrap();
        store.put("app", &serde_json::json!({})).await.unwrap();
        assert_eq!(store.keys().await.unwrap(), vec!["app", "sleep"]);
    }
}
