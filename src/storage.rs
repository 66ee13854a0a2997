//! Object storage for certificates and CRLs.
//!
//! Objects are addressed by slash-separated keys such as `ca/root.der` or
//! `full/example-root-ca.crl` and carry a flat string metadata map.

mod errors;
mod filesystem;
mod memory;

use std::collections::BTreeMap;

use async_trait::async_trait;

pub use errors::{StorageError, StorageResult};
pub use filesystem::FsBlobStore;
pub use memory::MemoryBlobStore;

pub type Metadata = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub bytes: Vec<u8>,
    pub metadata: Metadata,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Every object whose key starts with `prefix`, ordered by key.
    async fn list(&self, prefix: &str) -> StorageResult<Vec<StoredObject>>;

    async fn get(&self, key: &str) -> StorageResult<Option<StoredObject>>;

    /// Creates or replaces the object at `key`.
    async fn put(&self, key: &str, bytes: Vec<u8>, metadata: Metadata) -> StorageResult<()>;
}

/// Rejects keys that could escape the store root or alias another key.
pub fn validate_key(key: &str) -> StorageResult<()> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if invalid {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("ca/root.der").is_ok());
        assert!(validate_key("full/archive/root-5.crl").is_ok());
        for key in ["", "/etc/passwd", "ca/../secret", "ca//root.der", "ca/", "./x", "a\\b"] {
            assert!(
                matches!(validate_key(key), Err(StorageError::InvalidKey(_))),
                "{key} should be rejected"
            );
        }
    }
}
