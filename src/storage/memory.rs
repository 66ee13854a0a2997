use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::info;

use super::{BlobStore, Metadata, StorageResult, StoredObject, validate_key};

/// In-memory object store.
///
/// Nothing is persisted; clones share the same objects. Useful for
/// development and testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    objects: Arc<DashMap<String, StoredObject>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the amount of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn list(&self, prefix: &str) -> StorageResult<Vec<StoredObject>> {
        let mut objects: Vec<StoredObject> = self
            .objects
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.value().clone())
            .collect();
        objects.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(objects)
    }

    async fn get(&self, key: &str) -> StorageResult<Option<StoredObject>> {
        validate_key(key)?;
        Ok(self.objects.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &str, bytes: Vec<u8>, metadata: Metadata) -> StorageResult<()> {
        validate_key(key)?;
        info!("Storing {} bytes at {}", bytes.len(), key);
        self.objects.insert(
            key.to_string(),
            StoredObject {
                key: key.to_string(),
                bytes,
                metadata,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;

    #[tokio::test]
    async fn test_put_get_list() {
        let store = MemoryBlobStore::new();
        let mut metadata = Metadata::new();
        metadata.insert("contentType".to_string(), "application/pkix-cert".to_string());

        store.put("ca/b.der", vec![2], metadata.clone()).await.unwrap();
        store.put("ca/a.der", vec![1], Metadata::new()).await.unwrap();
        store.put("full/x.crl", vec![3], Metadata::new()).await.unwrap();

        let fetched = store.get("ca/b.der").await.unwrap().unwrap();
        assert_eq!(fetched.bytes, vec![2]);
        assert_eq!(fetched.metadata, metadata);
        assert!(store.get("ca/c.der").await.unwrap().is_none());

        let keys: Vec<String> = store
            .list("ca/")
            .await
            .unwrap()
            .into_iter()
            .map(|object| object.key)
            .collect();
        assert_eq!(keys, vec!["ca/a.der", "ca/b.der"]);
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn test_clones_share_objects() {
        let store = MemoryBlobStore::new();
        let clone = store.clone();
        clone.put("ca/a.der", vec![1], Metadata::new()).await.unwrap();
        assert!(store.get("ca/a.der").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_invalid_key_is_rejected() {
        let store = MemoryBlobStore::new();
        let err = store.put("../a", vec![], Metadata::new()).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
