use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::file::errors::FileIdError;

/// Stored file unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(pub Uuid);

impl FileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, FileIdError> {
        Uuid::parse_str(s)
            .map(FileId)
            .map_err(|e| FileIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Coarse file classification derived from the MIME top-level type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Document,
    Other,
}

impl FileKind {
    pub fn from_mime(mime_type: &str) -> Self {
        match mime_type.split('/').next().unwrap_or("") {
            "image" => FileKind::Image,
            "video" => FileKind::Video,
            "audio" => FileKind::Audio,
            "text" | "application" => FileKind::Document,
            _ => FileKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Video => "video",
            FileKind::Audio => "audio",
            FileKind::Document => "document",
            FileKind::Other => "other",
        }
    }

    pub fn from_str_or_other(s: &str) -> Self {
        match s {
            "image" => FileKind::Image,
            "video" => FileKind::Video,
            "audio" => FileKind::Audio,
            "document" => FileKind::Document,
            _ => FileKind::Other,
        }
    }
}

/// Metadata record for one blob in the object store.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub id: FileId,
    pub filename: String,
    pub bucket: String,
    pub path: String,
    pub mime_type: String,
    pub size: i64,
    pub kind: FileKind,
    pub created_at: DateTime<Utc>,
}

/// One inbound upload: original filename, declared content type, and payload.
#[derive(Debug, Clone)]
pub struct UploadCommand {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}
