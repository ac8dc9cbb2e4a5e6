use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::domain::file::errors::FileError;
use crate::domain::file::ports::ObjectStore;

/// Filesystem-backed object store.
///
/// Blobs land under `root/<bucket>/<path>`; the bucket directory is created
/// on first write.
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn blob_path(&self, bucket: &str, path: &str) -> PathBuf {
        self.root.join(bucket).join(path)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        _mime_type: &str,
        bytes: &[u8],
    ) -> Result<(), FileError> {
        let dir = self.root.join(bucket);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| FileError::StorageError(e.to_string()))?;

        fs::write(self.blob_path(bucket, path), bytes)
            .await
            .map_err(|e| FileError::StorageError(e.to_string()))?;

        Ok(())
    }

    async fn remove(&self, bucket: &str, path: &str) -> Result<(), FileError> {
        match fs::remove_file(self.blob_path(bucket, path)).await {
            Ok(()) => Ok(()),
            // Already gone counts as removed
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FileError::StorageError(e.to_string())),
        }
    }
}
