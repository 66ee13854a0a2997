use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};
use walkdir::WalkDir;

use super::{BlobStore, Metadata, StorageError, StorageResult, StoredObject, validate_key};

const METADATA_SUFFIX: &str = ".meta.json";

/// Object store rooted at a directory.
///
/// Each object lives at `<root>/<key>` with its metadata in a
/// `<key>.meta.json` file next to it.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        if key.ends_with(METADATA_SUFFIX) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(key.split('/').fold(self.root.clone(), |path, segment| path.join(segment)))
    }

    fn metadata_path(object_path: &Path) -> PathBuf {
        let mut path = object_path.as_os_str().to_owned();
        path.push(METADATA_SUFFIX);
        PathBuf::from(path)
    }

    fn key_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let segments = relative
            .components()
            .map(|component| component.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?;
        Some(segments.join("/"))
    }

    async fn read_object(&self, key: String, path: &Path) -> StorageResult<StoredObject> {
        let bytes = fs::read(path).await?;
        let metadata = match fs::read(Self::metadata_path(path)).await {
            Ok(raw) => serde_json::from_slice(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Metadata::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(StoredObject {
            key,
            bytes,
            metadata,
        })
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn list(&self, prefix: &str) -> StorageResult<Vec<StoredObject>> {
        if !self.root.exists() {
            debug!("Storage root {:?} does not exist yet", self.root);
            return Ok(Vec::new());
        }

        let mut objects = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if let Some(key) = self.key_for(path)
                && key.starts_with(prefix)
                && !key.ends_with(METADATA_SUFFIX)
            {
                objects.push(self.read_object(key, path).await?);
            }
        }
        objects.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(objects)
    }

    async fn get(&self, key: &str) -> StorageResult<Option<StoredObject>> {
        let path = self.object_path(key)?;
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }
        self.read_object(key.to_string(), &path).await.map(Some)
    }

    async fn put(&self, key: &str, bytes: Vec<u8>, metadata: Metadata) -> StorageResult<()> {
        let path = self.object_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let metadata = serde_json::to_vec_pretty(&metadata)?;
        info!("Writing {} bytes to {:?}", bytes.len(), path);
        fs::write(&path, bytes).await?;
        fs::write(Self::metadata_path(&path), metadata).await?;
        Ok(())
    }
}
