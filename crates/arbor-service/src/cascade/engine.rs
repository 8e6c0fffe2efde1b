//! Cascading deletion of files and folder subtrees.
//!
//! A folder is deleted bottom-up: every descendant folder is emptied of its
//! files (blob first, then record) before its own record goes, and a folder
//! record is removed only after all of its children. If a step fails the
//! walk stops there, leaving every not-yet-visited node intact, and the
//! error names the node that failed. Running the deletion again resumes
//! with whatever is left.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use arbor_core::error::{AppError, ErrorKind};
use arbor_core::result::AppResult;
use arbor_core::traits::BlobStore;
use arbor_core::types::{FileId, FolderId, NodeRef, OwnerId};
use arbor_database::repositories::{FileRepository, FolderRepository};
use arbor_entity::file::File;
use arbor_entity::folder::Folder;

use crate::cascade::report::DeletionReport;
use crate::context::RequestContext;

/// Worklist step of the post-order walk.
#[derive(Debug, Clone, Copy)]
enum Visit {
    /// Schedule the folder's children.
    Enter(FolderId),
    /// All children are gone; remove the folder's files, then the folder.
    Exit(FolderId),
}

/// Deletes files and folders together with their blobs.
#[derive(Debug, Clone)]
pub struct CascadeService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Blob store.
    blobs: Arc<dyn BlobStore>,
}

impl CascadeService {
    /// Creates a new cascade service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        file_repo: Arc<FileRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            folder_repo,
            file_repo,
            blobs,
        }
    }

    /// Delete one owned file and its blob.
    pub async fn delete_file(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
    ) -> AppResult<DeletionReport> {
        let file = self
            .file_repo
            .find_owned(file_id, ctx.owner_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))?;

        let mut report = DeletionReport::new(file.folder_id);
        self.remove_file(&file, &mut report).await?;

        info!(
            owner_id = %ctx.owner_id,
            file_id = %file.id,
            blobs_missing = report.blobs_missing,
            "File deleted"
        );
        Ok(report)
    }

    /// Delete an owned folder and everything beneath it.
    ///
    /// The walk runs on its own task and is awaited to completion, so a
    /// dropped caller cannot stop it between a blob removal and the matching
    /// record removal.
    pub async fn delete_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
    ) -> AppResult<DeletionReport> {
        let target = self
            .folder_repo
            .find_owned(folder_id, ctx.owner_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        let engine = self.clone();
        let owner = ctx.owner_id;
        let report = tokio::spawn(async move { engine.remove_subtree(target, owner).await })
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Cascade task failed", e))??;

        info!(
            owner_id = %ctx.owner_id,
            folder_id = %folder_id,
            folders_deleted = report.folders_deleted,
            files_deleted = report.files_deleted,
            blobs_missing = report.blobs_missing,
            "Folder subtree deleted"
        );
        Ok(report)
    }

    /// Post-order walk over the subtree rooted at `target`.
    async fn remove_subtree(&self, target: Folder, owner: OwnerId) -> AppResult<DeletionReport> {
        let mut report = DeletionReport::new(target.parent_id);
        let mut entered = HashSet::new();
        let mut stack = vec![Visit::Enter(target.id)];

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(id) => {
                    if !entered.insert(id) {
                        return Err(AppError::cycle_detected(format!(
                            "Folder {id} appears twice beneath {}",
                            target.id
                        ))
                        .at_node(NodeRef::Folder(id)));
                    }
                    stack.push(Visit::Exit(id));
                    let children = self
                        .folder_repo
                        .child_ids(id, owner)
                        .await
                        .map_err(|e| e.at_node(NodeRef::Folder(id)))?;
                    stack.extend(children.into_iter().rev().map(Visit::Enter));
                }
                Visit::Exit(id) => {
                    let files = self
                        .file_repo
                        .find_in_folder(Some(id), owner)
                        .await
                        .map_err(|e| e.at_node(NodeRef::Folder(id)))?;
                    for file in &files {
                        self.remove_file(file, &mut report).await?;
                    }

                    if self
                        .folder_repo
                        .delete(id, owner)
                        .await
                        .map_err(|e| e.at_node(NodeRef::Folder(id)))?
                    {
                        report.folders_deleted += 1;
                        debug!(folder_id = %id, "Folder record removed");
                    }
                }
            }
        }

        Ok(report)
    }

    /// Remove a file's blob, then its record. A blob that is already gone
    /// counts as removed.
    async fn remove_file(&self, file: &File, report: &mut DeletionReport) -> AppResult<()> {
        match self.blobs.delete(&file.blob_ref).await {
            Ok(()) => {}
            Err(e) if e.is(ErrorKind::NotFound) => {
                warn!(
                    file_id = %file.id,
                    blob_ref = %file.blob_ref,
                    "Blob already missing, removing record anyway"
                );
                report.blobs_missing += 1;
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete blob of file {}", file.id),
                    e,
                )
                .at_node(NodeRef::File(file.id)));
            }
        }

        if self
            .file_repo
            .delete(file.id, file.owner_id)
            .await
            .map_err(|e| e.at_node(NodeRef::File(file.id)))?
        {
            report.files_deleted += 1;
        }
        Ok(())
    }
}
