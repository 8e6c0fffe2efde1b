//! Batch upload: store each submitted file under a folder.
//!
//! The target folder is checked once. After that every item succeeds or
//! fails on its own, and the report lists one outcome per item in
//! submission order.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use arbor_core::config::StorageConfig;
use arbor_core::error::{AppError, ErrorKind};
use arbor_core::result::AppResult;
use arbor_core::traits::BlobStore;
use arbor_core::types::{FileId, FolderId};
use arbor_database::repositories::FolderRepository;
use arbor_entity::file::File;
use arbor_storage::{blob_key, sanitize_file_name};

use crate::context::RequestContext;
use crate::file::service::{FileService, RegisterFileRequest};

/// One submitted file.
#[derive(Debug, Clone, Default)]
pub struct UploadItem {
    /// Client-supplied file name.
    pub file_name: Option<String>,
    /// Client-supplied content type.
    pub content_type: Option<String>,
    /// The file content.
    pub data: Option<Bytes>,
}

/// Result of storing one item.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadOutcome {
    /// The blob and its record were both written.
    Stored {
        /// Position of the item in the submission.
        index: usize,
        /// The created record.
        file: File,
    },
    /// Nothing was kept for this item.
    Rejected {
        /// Position of the item in the submission.
        index: usize,
        /// Name as submitted.
        file_name: Option<String>,
        /// Error category.
        error: ErrorKind,
        /// Human-readable reason.
        message: String,
    },
}

impl UploadOutcome {
    /// The created file, if the item was stored.
    pub fn file(&self) -> Option<&File> {
        match self {
            Self::Stored { file, .. } => Some(file),
            Self::Rejected { .. } => None,
        }
    }
}

/// Per-item results of a batch upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadReport {
    /// The folder uploaded into, or `None` for the root.
    pub folder_id: Option<FolderId>,
    /// One outcome per submitted item, in order.
    pub outcomes: Vec<UploadOutcome>,
}

impl UploadReport {
    /// Files that were stored.
    pub fn stored(&self) -> impl Iterator<Item = &File> {
        self.outcomes.iter().filter_map(UploadOutcome::file)
    }

    /// Number of rejected items.
    pub fn rejected_count(&self) -> usize {
        self.outcomes.len() - self.stored().count()
    }
}

/// Handles batch uploads.
#[derive(Debug, Clone)]
pub struct UploadService {
    /// File record service.
    files: FileService,
    /// Folder repository, for the target check.
    folder_repo: Arc<FolderRepository>,
    /// Blob store.
    blobs: Arc<dyn BlobStore>,
    /// Storage configuration.
    config: StorageConfig,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        files: FileService,
        folder_repo: Arc<FolderRepository>,
        blobs: Arc<dyn BlobStore>,
        config: StorageConfig,
    ) -> Self {
        Self {
            files,
            folder_repo,
            blobs,
            config,
        }
    }

    /// Upload a batch of files into a folder, or the root when `None`.
    ///
    /// Fails as a whole only if the folder is not the caller's, or the batch
    /// is empty.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        folder_id: Option<FolderId>,
        items: Vec<UploadItem>,
    ) -> AppResult<UploadReport> {
        if let Some(id) = folder_id {
            self.folder_repo
                .find_owned(id, ctx.owner_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        }
        if items.is_empty() {
            return Err(AppError::validation("No files supplied"));
        }

        let mut outcomes = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let file_name = item.file_name.clone();
            match self.store_item(ctx, folder_id, item).await {
                Ok(file) => outcomes.push(UploadOutcome::Stored { index, file }),
                Err(e) => {
                    warn!(
                        owner_id = %ctx.owner_id,
                        index,
                        file_name = ?file_name,
                        error = %e,
                        "Upload item rejected"
                    );
                    outcomes.push(UploadOutcome::Rejected {
                        index,
                        file_name,
                        error: e.kind,
                        message: e.message,
                    });
                }
            }
        }

        let report = UploadReport {
            folder_id,
            outcomes,
        };
        info!(
            owner_id = %ctx.owner_id,
            folder_id = ?folder_id,
            stored = report.stored().count(),
            rejected = report.rejected_count(),
            "Batch upload finished"
        );

        Ok(report)
    }

    /// Write one item's blob, then its record. A failed record insert
    /// removes the blob again.
    async fn store_item(
        &self,
        ctx: &RequestContext,
        folder_id: Option<FolderId>,
        item: UploadItem,
    ) -> AppResult<File> {
        let raw_name = item
            .file_name
            .ok_or_else(|| AppError::validation("File name is required"))?;
        let name = sanitize_file_name(&raw_name)?;

        let data = item
            .data
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppError::validation(format!("File {name:?} is empty")))?;
        if data.len() as u64 > self.config.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File {name:?} is {} bytes, over the {} byte limit",
                data.len(),
                self.config.max_upload_size_bytes
            )));
        }

        let id = FileId::new();
        let key = blob_key(ctx.owner_id, id, &name);
        let size_bytes = data.len() as i64;

        self.blobs.put(&key, data).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to store {name:?}"), e)
        })?;

        let request = RegisterFileRequest {
            id,
            name,
            blob_ref: key.clone(),
            size_bytes,
            content_type: item.content_type,
            folder_id,
        };
        match self.files.create_file(ctx, request).await {
            Ok(file) => Ok(file),
            Err(e) => {
                if let Err(cleanup) = self.blobs.delete(&key).await {
                    warn!(blob_ref = %key, error = %cleanup, "Failed to remove orphaned blob");
                }
                Err(e)
            }
        }
    }
}
