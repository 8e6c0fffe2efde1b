//! File service: record lookup, registration, and content download.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{error, info};

use arbor_core::error::{AppError, ErrorKind};
use arbor_core::result::AppResult;
use arbor_core::traits::BlobStore;
use arbor_core::types::{FileId, FolderId, NodeRef};
use arbor_database::repositories::FileRepository;
use arbor_entity::file::{CreateFile, File};
use arbor_storage::is_owned_key;

use crate::context::RequestContext;

/// A file record to register against an already-written blob.
#[derive(Debug, Clone)]
pub struct RegisterFileRequest {
    /// Pre-allocated file ID.
    pub id: FileId,
    /// The file name.
    pub name: String,
    /// Key of the blob holding the content.
    pub blob_ref: String,
    /// Content size in bytes.
    pub size_bytes: i64,
    /// Content type.
    pub content_type: Option<String>,
    /// Containing folder, or `None` for the root.
    pub folder_id: Option<FolderId>,
}

/// Manages file records and their content.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Blob store holding file content.
    blobs: Arc<dyn BlobStore>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(file_repo: Arc<FileRepository>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { file_repo, blobs }
    }

    /// Get a file owned by the caller.
    pub async fn get_file(&self, ctx: &RequestContext, file_id: FileId) -> AppResult<File> {
        self.file_repo
            .find_owned(file_id, ctx.owner_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))
    }

    /// Register a file record for a blob that already exists.
    pub async fn create_file(
        &self,
        ctx: &RequestContext,
        request: RegisterFileRequest,
    ) -> AppResult<File> {
        if request.name.trim().is_empty() {
            return Err(AppError::validation("File name must not be empty"));
        }
        // A blob outside the caller's area is reported like a missing one.
        if !is_owned_key(ctx.owner_id, &request.blob_ref)
            || !self.blobs.exists(&request.blob_ref).await?
        {
            return Err(AppError::validation(format!(
                "Blob {:?} does not exist",
                request.blob_ref
            )));
        }

        let file = self
            .file_repo
            .create(&CreateFile {
                id: request.id,
                name: request.name,
                blob_ref: request.blob_ref,
                size_bytes: request.size_bytes,
                content_type: request.content_type,
                folder_id: request.folder_id,
                owner_id: ctx.owner_id,
            })
            .await?;

        info!(
            owner_id = %ctx.owner_id,
            file_id = %file.id,
            folder_id = ?file.folder_id,
            size = file.size_bytes,
            "File registered"
        );

        Ok(file)
    }

    /// Read an owned file together with its content.
    pub async fn download(&self, ctx: &RequestContext, file_id: FileId) -> AppResult<(File, Bytes)> {
        let file = self.get_file(ctx, file_id).await?;

        let data = self.blobs.get(&file.blob_ref).await.map_err(|e| {
            if e.is(ErrorKind::NotFound) {
                error!(file_id = %file.id, blob_ref = %file.blob_ref, "File record has no blob");
            }
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read content of file {}", file.id),
                e,
            )
            .at_node(NodeRef::File(file.id))
        })?;

        Ok((file, data))
    }
}
