use async_trait::async_trait;

use crate::domain::file::errors::FileError;
use crate::domain::file::models::FileId;
use crate::domain::file::models::StoredFile;
use crate::domain::file::models::UploadCommand;

/// Port for file domain service operations.
#[async_trait]
pub trait FileServicePort: Send + Sync + 'static {
    /// Write one upload to the object store and persist its metadata.
    ///
    /// # Errors
    /// * `InvalidUpload` - Empty payload or missing filename
    /// * `StorageError` - Blob write failed
    /// * `DatabaseError` - Metadata persistence failed
    async fn store_upload(
        &self,
        command: UploadCommand,
        bucket: &str,
    ) -> Result<StoredFile, FileError>;

    /// Store several uploads concurrently.
    ///
    /// Fans out independent per-item stores and waits for all of them; any
    /// single failure fails the whole call rather than returning a partial
    /// result as if it were total.
    async fn bulk_store(
        &self,
        commands: Vec<UploadCommand>,
        bucket: &str,
    ) -> Result<Vec<StoredFile>, FileError>;

    /// # Errors
    /// * `NotFound` - File record does not exist
    async fn get_file(&self, id: &FileId) -> Result<StoredFile, FileError>;

    /// Delete the blob, then the metadata record.
    async fn remove(&self, id: &FileId) -> Result<(), FileError>;

    /// Delete several files; blob deletes fan out concurrently.
    async fn bulk_remove(&self, ids: &[FileId]) -> Result<(), FileError>;
}

/// Persistence operations for file metadata.
#[async_trait]
pub trait FileRepository: Send + Sync + 'static {
    async fn create(&self, file: StoredFile) -> Result<StoredFile, FileError>;

    async fn find_by_id(&self, id: &FileId) -> Result<Option<StoredFile>, FileError>;

    async fn find_by_ids(&self, ids: &[FileId]) -> Result<Vec<StoredFile>, FileError>;

    async fn delete(&self, id: &FileId) -> Result<(), FileError>;

    async fn delete_many(&self, ids: &[FileId]) -> Result<(), FileError>;
}

/// Opaque blob store reachable by bucket and path.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<(), FileError>;

    async fn remove(&self, bucket: &str, path: &str) -> Result<(), FileError>;
}
