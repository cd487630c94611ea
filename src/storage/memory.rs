/**
 * In-Memory Object Store
 *
 * Development and test `ObjectStore` that keeps objects in a concurrent
 * map. URLs follow the same `https://...com/{key}` shape as the S3 store so
 * that key extraction on deletion behaves identically.
 */
use async_trait::async_trait;
use dashmap::DashMap;

use crate::storage::{ObjectStore, StorageError};

const MEMORY_BASE_URL: &str = "https://educonnect-dev.s3.local.example.com";

/// Concurrent in-memory object store.
#[derive(Default)]
pub struct MemoryStore {
    objects: DashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an object exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        _content_type: &str,
    ) -> Result<String, StorageError> {
        self.objects.insert(key.to_string(), bytes.to_vec());
        Ok(format!("{MEMORY_BASE_URL}/{key}"))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::upload::key_from_url;

    #[tokio::test]
    async fn test_put_then_delete() {
        let store = MemoryStore::new();
        let url = store
            .put("posts/abc.png", b"bytes", "image/png")
            .await
            .unwrap();
        assert!(store.contains("posts/abc.png"));

        // The returned URL must round-trip back to the storage key.
        assert_eq!(key_from_url(&url), Some("posts/abc.png"));

        store.delete("posts/abc.png").await.unwrap();
        assert!(!store.contains("posts/abc.png"));
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.delete("materials/Tech U/missing.pdf").await.is_ok());
    }
}
