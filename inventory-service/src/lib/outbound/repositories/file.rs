use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::file::errors::FileError;
use crate::domain::file::models::FileId;
use crate::domain::file::models::FileKind;
use crate::domain::file::models::StoredFile;
use crate::domain::file::ports::FileRepository;

pub struct PostgresFileRepository {
    pool: PgPool,
}

impl PostgresFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FileRow {
    id: Uuid,
    filename: String,
    bucket: String,
    path: String,
    mime_type: String,
    size: i64,
    kind: String,
    created_at: DateTime<Utc>,
}

impl From<FileRow> for StoredFile {
    fn from(row: FileRow) -> Self {
        Self {
            id: FileId(row.id),
            filename: row.filename,
            bucket: row.bucket,
            path: row.path,
            mime_type: row.mime_type,
            size: row.size,
            kind: FileKind::from_str_or_other(&row.kind),
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl FileRepository for PostgresFileRepository {
    async fn create(&self, file: StoredFile) -> Result<StoredFile, FileError> {
        sqlx::query(
            r#"
            INSERT INTO files (id, filename, bucket, path, mime_type, size, kind, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(file.id.0)
        .bind(&file.filename)
        .bind(&file.bucket)
        .bind(&file.path)
        .bind(&file.mime_type)
        .bind(file.size)
        .bind(file.kind.as_str())
        .bind(file.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| FileError::DatabaseError(e.to_string()))?;

        Ok(file)
    }

    async fn find_by_id(&self, id: &FileId) -> Result<Option<StoredFile>, FileError> {
        let row = sqlx::query_as::<_, FileRow>(
            r#"
            SELECT id, filename, bucket, path, mime_type, size, kind, created_at
            FROM files
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| FileError::DatabaseError(e.to_string()))?;

        Ok(row.map(StoredFile::from))
    }

    async fn find_by_ids(&self, ids: &[FileId]) -> Result<Vec<StoredFile>, FileError> {
        let uuids: Vec<_> = ids.iter().map(|id| id.0).collect();

        let rows = sqlx::query_as::<_, FileRow>(
            r#"
            SELECT id, filename, bucket, path, mime_type, size, kind, created_at
            FROM files
            WHERE id = ANY($1)
            "#,
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| FileError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(StoredFile::from).collect())
    }

    async fn delete(&self, id: &FileId) -> Result<(), FileError> {
        let result = sqlx::query(
            r#"
            DELETE FROM files
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| FileError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(FileError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete_many(&self, ids: &[FileId]) -> Result<(), FileError> {
        let uuids: Vec<_> = ids.iter().map(|id| id.0).collect();

        sqlx::query(
            r#"
            DELETE FROM files
            WHERE id = ANY($1)
            "#,
        )
        .bind(&uuids)
        .execute(&self.pool)
        .await
        .map_err(|e| FileError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
