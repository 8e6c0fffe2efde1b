//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use arbor_core::types::{FileId, FolderId, OwnerId};

/// A file record. Its content lives in the blob store under `blob_ref`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// The file name shown to the user.
    pub name: String,
    /// Key of the backing blob.
    pub blob_ref: String,
    /// Content size in bytes.
    pub size_bytes: i64,
    /// Content type reported at upload, if any.
    pub content_type: Option<String>,
    /// Containing folder (null for root-level files).
    pub folder_id: Option<FolderId>,
    /// The file owner.
    pub owner_id: OwnerId,
    /// When the file was uploaded.
    pub uploaded_at: DateTime<Utc>,
}

impl File {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// Pre-allocated identifier; the blob key embeds it.
    pub id: FileId,
    /// The file name.
    pub name: String,
    /// Key of the already-written blob.
    pub blob_ref: String,
    /// Content size in bytes.
    pub size_bytes: i64,
    /// Content type.
    pub content_type: Option<String>,
    /// Containing folder.
    pub folder_id: Option<FolderId>,
    /// The file owner.
    pub owner_id: OwnerId,
}
