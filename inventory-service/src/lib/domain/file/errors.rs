use thiserror::Error;

/// Error for FileId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FileIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for file operations
#[derive(Debug, Clone, Error)]
pub enum FileError {
    #[error("Invalid file ID: {0}")]
    InvalidFileId(#[from] FileIdError),

    #[error("Invalid file upload input")]
    InvalidUpload,

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Object store error: {0}")]
    StorageError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
