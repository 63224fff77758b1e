//! `BlobStore` trait: named JSON blobs, read at startup and written on change.

use async_trait::async_trait;

use crate::error::StoreError;

/// Backend-agnostic key-value store for persisted containers.
///
/// Every key is independent: reading or writing one key never touches
/// another.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read a blob. `Ok(None)` if the key was never written.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;

    /// Write (replace) a blob.
    async fn put(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError>;

    /// Delete a blob. Returns whether it existed.
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;

    /// All stored keys, sorted.
    async fn keys(&self) -> Result<Vec<String>, StoreError>;
}
