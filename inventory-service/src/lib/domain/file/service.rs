use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::try_join_all;

use crate::domain::file::errors::FileError;
use crate::domain::file::models::FileId;
use crate::domain::file::models::FileKind;
use crate::domain::file::models::StoredFile;
use crate::domain::file::models::UploadCommand;
use crate::domain::file::ports::FileRepository;
use crate::domain::file::ports::FileServicePort;
use crate::domain::file::ports::ObjectStore;

/// Domain service implementation for file operations.
///
/// Blob writes go to the object store first; the metadata record is only
/// created once the blob exists.
pub struct FileService<FR, OS>
where
    FR: FileRepository,
    OS: ObjectStore,
{
    repository: Arc<FR>,
    object_store: Arc<OS>,
}

impl<FR, OS> FileService<FR, OS>
where
    FR: FileRepository,
    OS: ObjectStore,
{
    pub fn new(repository: Arc<FR>, object_store: Arc<OS>) -> Self {
        Self {
            repository,
            object_store,
        }
    }

    /// Collision-free stored path: a fresh UUID keeping the upload's extension.
    fn stored_path(id: &FileId, filename: &str) -> String {
        match Path::new(filename).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{}", id, ext),
            None => id.to_string(),
        }
    }
}

#[async_trait]
impl<FR, OS> FileServicePort for FileService<FR, OS>
where
    FR: FileRepository,
    OS: ObjectStore,
{
    async fn store_upload(
        &self,
        command: UploadCommand,
        bucket: &str,
    ) -> Result<StoredFile, FileError> {
        if command.bytes.is_empty() || command.filename.is_empty() {
            return Err(FileError::InvalidUpload);
        }

        let id = FileId::new();
        let path = Self::stored_path(&id, &command.filename);

        self.object_store
            .put(bucket, &path, &command.mime_type, &command.bytes)
            .await?;

        let file = StoredFile {
            id,
            filename: command.filename,
            bucket: bucket.to_string(),
            path,
            kind: FileKind::from_mime(&command.mime_type),
            mime_type: command.mime_type,
            size: command.bytes.len() as i64,
            created_at: Utc::now(),
        };

        self.repository.create(file).await
    }

    async fn bulk_store(
        &self,
        commands: Vec<UploadCommand>,
        bucket: &str,
    ) -> Result<Vec<StoredFile>, FileError> {
        try_join_all(
            commands
                .into_iter()
                .map(|command| self.store_upload(command, bucket)),
        )
        .await
    }

    async fn get_file(&self, id: &FileId) -> Result<StoredFile, FileError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(FileError::NotFound(id.to_string()))
    }

    async fn remove(&self, id: &FileId) -> Result<(), FileError> {
        let file = self.get_file(id).await?;

        self.object_store.remove(&file.bucket, &file.path).await?;

        self.repository.delete(id).await
    }

    async fn bulk_remove(&self, ids: &[FileId]) -> Result<(), FileError> {
        let files = self.repository.find_by_ids(ids).await?;

        try_join_all(
            files
                .iter()
                .map(|file| self.object_store.remove(&file.bucket, &file.path)),
        )
        .await?;

        self.repository.delete_many(ids).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;

    mock! {
        pub TestFileRepository {}

        #[async_trait]
        impl FileRepository for TestFileRepository {
            async fn create(&self, file: StoredFile) -> Result<StoredFile, FileError>;
            async fn find_by_id(&self, id: &FileId) -> Result<Option<StoredFile>, FileError>;
            async fn find_by_ids(&self, ids: &[FileId]) -> Result<Vec<StoredFile>, FileError>;
            async fn delete(&self, id: &FileId) -> Result<(), FileError>;
            async fn delete_many(&self, ids: &[FileId]) -> Result<(), FileError>;
        }
    }

    mock! {
        pub TestObjectStore {}

        #[async_trait]
        impl ObjectStore for TestObjectStore {
            async fn put(&self, bucket: &str, path: &str, mime_type: &str, bytes: &[u8]) -> Result<(), FileError>;
            async fn remove(&self, bucket: &str, path: &str) -> Result<(), FileError>;
        }
    }

    fn upload(filename: &str) -> UploadCommand {
        UploadCommand {
            filename: filename.to_string(),
            mime_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    #[tokio::test]
    async fn test_store_upload_success() {
        let mut repository = MockTestFileRepository::new();
        let mut object_store = MockTestObjectStore::new();

        object_store
            .expect_put()
            .withf(|bucket, path, mime, bytes| {
                bucket == "product" && path.ends_with(".png") && mime == "image/png" && bytes.len() == 3
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        repository
            .expect_create()
            .withf(|f| f.kind == FileKind::Image && f.size == 3)
            .times(1)
            .returning(|f| Ok(f));

        let service = FileService::new(Arc::new(repository), Arc::new(object_store));

        let stored = service
            .store_upload(upload("photo.png"), "product")
            .await
            .expect("store failed");

        assert_eq!(stored.bucket, "product");
        assert_eq!(stored.filename, "photo.png");
    }

    #[tokio::test]
    async fn test_store_upload_rejects_empty_payload() {
        let repository = MockTestFileRepository::new();
        let object_store = MockTestObjectStore::new();

        let service = FileService::new(Arc::new(repository), Arc::new(object_store));

        let result = service
            .store_upload(
                UploadCommand {
                    filename: "empty.png".to_string(),
                    mime_type: "image/png".to_string(),
                    bytes: vec![],
                },
                "product",
            )
            .await;

        assert!(matches!(result, Err(FileError::InvalidUpload)));
    }

    #[tokio::test]
    async fn test_bulk_store_surfaces_single_failure() {
        let mut repository = MockTestFileRepository::new();
        let mut object_store = MockTestObjectStore::new();

        repository.expect_create().returning(|f| Ok(f));
        // The .gif write succeeds, the .png write fails; the whole call must fail
        object_store.expect_put().returning(|_, path, _, _| {
            if path.ends_with(".png") {
                Err(FileError::StorageError("disk full".to_string()))
            } else {
                Ok(())
            }
        });

        let service = FileService::new(Arc::new(repository), Arc::new(object_store));

        let result = service
            .bulk_store(vec![upload("a.gif"), upload("b.png")], "product")
            .await;

        assert!(matches!(result, Err(FileError::StorageError(_))));
    }

    #[tokio::test]
    async fn test_remove_deletes_blob_then_record() {
        let id = FileId::new();
        let file = StoredFile {
            id,
            filename: "photo.png".to_string(),
            bucket: "product".to_string(),
            path: format!("{}.png", id),
            mime_type: "image/png".to_string(),
            size: 3,
            kind: FileKind::Image,
            created_at: Utc::now(),
        };

        let mut repository = MockTestFileRepository::new();
        let mut object_store = MockTestObjectStore::new();

        let found = file.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        object_store
            .expect_remove()
            .withf(move |bucket, path| bucket == "product" && path.ends_with(".png"))
            .times(1)
            .returning(|_, _| Ok(()));
        repository.expect_delete().times(1).returning(|_| Ok(()));

        let service = FileService::new(Arc::new(repository), Arc::new(object_store));

        service.remove(&id).await.expect("remove failed");
    }

    #[tokio::test]
    async fn test_remove_missing_file() {
        let mut repository = MockTestFileRepository::new();
        let object_store = MockTestObjectStore::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = FileService::new(Arc::new(repository), Arc::new(object_store));

        let result = service.remove(&FileId::new()).await;
        assert!(matches!(result, Err(FileError::NotFound(_))));
    }
}
