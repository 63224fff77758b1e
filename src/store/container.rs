//! Typed persisted containers.
//!
//! A [`Container`] owns one named blob. Writes replace the whole value in a
//! single assignment after the blob store accepted it, so readers never see a
//! partially applied update. Components receive only the containers they own.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreError;
use crate::store::traits::BlobStore;

/// State that lives in its own named container.
pub trait ContainerState:
    Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static
{
    /// Blob store key, unique per container type.
    const KEY: &'static str;
}

/// A cached, write-through handle to one container.
pub struct Container<T: ContainerState> {
    store: Arc<dyn BlobStore>,
    value: RwLock<T>,
}

impl<T: ContainerState> Container<T> {
    /// Load the container from `store`, starting from `T::default()` if it
    /// was never written.
    pub async fn load(store: Arc<dyn BlobStore>) -> Result<Arc<Self>, StoreError> {
        let value = match store.get(T::KEY).await? {
            Some(raw) => serde_json::from_value(raw).map_err(|e| StoreError::Serialization {
                key: T::KEY.to_string(),
                reason: e.to_string(),
            })?,
            None => T::default(),
        };
        debug!(key = T::KEY, "Container loaded");
        Ok(Arc::new(Self {
            store,
            value: RwLock::new(value),
        }))
    }

    pub fn key(&self) -> &'static str {
        T::KEY
    }

    /// A snapshot of the current value.
    pub async fn get(&self) -> T {
        self.value.read().await.clone()
    }

    /// Read without cloning the whole value.
    pub async fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.value.read().await)
    }

    /// Apply `f` to a copy, persist the copy, then swap it in.
    ///
    /// If persisting fails the cached value is unchanged.
    pub async fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, StoreError> {
        let mut guard = self.value.write().await;
        let mut next = guard.clone();
        let result = f(&mut next);
        self.persist(&next).await?;
        *guard = next;
        Ok(result)
    }

    async fn persist(&self, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_value(value).map_err(|e| StoreError::Serialization {
            key: T::KEY.to_string(),
            reason: e.to_string(),
        })?;
        self.store.put(T::KEY, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde::Deserialize;

    use super::*;
    use crate::store::memory::MemoryStore;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        count: u32,
        #[serde(default)]
        label: String,
    }

    impl ContainerState for Counter {
        const KEY: &'static str = "counter";
    }

    /// Store that rejects every write.
    struct ReadOnlyStore;

    #[async_trait]
    impl BlobStore for ReadOnlyStore {
        async fn get(&self, _key: &str) -> Result<Option<serde_json::Value>, StoreError> {
            Ok(None)
        }
        async fn put(&self, _key: &str, _value: &serde_json::Value) -> Result<(), StoreError> {
            Err(StoreError::Query("read only".to_string()))
        }
        async fn delete(&self, _key: &str) -> Result<bool, StoreError> {
            Ok(false)
        }
        async fn keys(&self) -> Result<Vec<String>, StoreError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn missing_blob_loads_default() {
        let store: Arc<dyn BlobStore> = Arc::new(MemoryStore::new());
        let container = Container::<Counter>::load(store).await.unwrap();
        assert_eq!(container.get().await, Counter::default());
    }

    #[tokio::test]
    async fn update_writes_through() {
        let store: Arc<dyn BlobStore> = Arc::new(MemoryStore::new());
        let container = Container::<Counter>::load(Arc::clone(&store)).await.unwrap();
        let count = container
            .update(|c| {
                c.count += 2;
                c.count
            })
            .await
            .unwrap();
        assert_eq!(count, 2);

        let reloaded = Container::<Counter>::load(store).await.unwrap();
        assert_eq!(reloaded.get().await.count, 2);
    }

    #[tokio::test]
    async fn failed_write_keeps_cached_value() {
        let store: Arc<dyn BlobStore> = Arc::new(ReadOnlyStore);
        let container = Container::<Counter>::load(store).await.unwrap();
        let result = container.update(|c| c.count = 10).await;
        assert!(result.is_err());
        assert_eq!(container.get().await.count, 0);
    }

    #[tokio::test]
    async fn missing_fields_default_on_load() {
        let store: Arc<dyn BlobStore> = Arc::new(MemoryStore::new());
        store
            .put("counter", &serde_json::json!({"count": 7}))
            .await
            .unwrap();
        let container = Container::<Counter>::load(store).await.unwrap();
        assert_eq!(container.read(|c| c.count).await, 7);
        assert!(container.read(|c| c.label.is_empty()).await);
    }
}
