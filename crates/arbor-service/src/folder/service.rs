//! Folder service: create, look up, list, and move folders.

use std::sync::Arc;

use tracing::info;

use arbor_core::error::AppError;
use arbor_core::result::AppResult;
use arbor_core::types::FolderId;
use arbor_database::repositories::{FileRepository, FolderRepository};
use arbor_entity::folder::{CreateFolder, Folder, FolderListing};

use crate::context::RequestContext;

/// Manages folders within the caller's namespace.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// File repository, for listings.
    file_repo: Arc<FileRepository>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folder_repo: Arc<FolderRepository>, file_repo: Arc<FileRepository>) -> Self {
        Self {
            folder_repo,
            file_repo,
        }
    }

    /// Get a folder owned by the caller.
    pub async fn get_folder(&self, ctx: &RequestContext, folder_id: FolderId) -> AppResult<Folder> {
        self.folder_repo
            .find_owned(folder_id, ctx.owner_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// List the direct children of a folder, or of the root when `None`.
    pub async fn list_children(
        &self,
        ctx: &RequestContext,
        folder_id: Option<FolderId>,
    ) -> AppResult<FolderListing> {
        let folders = match folder_id {
            Some(id) => {
                self.get_folder(ctx, id).await?;
                self.folder_repo.find_children(id, ctx.owner_id).await?
            }
            None => self.folder_repo.find_roots(ctx.owner_id).await?,
        };
        let files = self.file_repo.find_in_folder(folder_id, ctx.owner_id).await?;

        Ok(FolderListing { folders, files })
    }

    /// Create a new folder, at the root or beneath an owned parent.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent_id: Option<FolderId>,
    ) -> AppResult<Folder> {
        let data = CreateFolder::new(name, parent_id, ctx.owner_id)?;
        let folder = self.folder_repo.create(&data).await?;

        info!(
            owner_id = %ctx.owner_id,
            folder_id = %folder.id,
            parent_id = ?folder.parent_id,
            name = %folder.name,
            "Folder created"
        );

        Ok(folder)
    }

    /// Move a folder under a new parent, or to the root when `None`.
    ///
    /// Fails with `CycleDetected` when the destination lies in the folder's
    /// own subtree, including the folder itself.
    pub async fn move_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        new_parent_id: Option<FolderId>,
    ) -> AppResult<Folder> {
        let folder = self
            .folder_repo
            .reparent(folder_id, new_parent_id, ctx.owner_id)
            .await?;

        info!(
            owner_id = %ctx.owner_id,
            folder_id = %folder.id,
            parent_id = ?folder.parent_id,
            "Folder moved"
        );

        Ok(folder)
    }
}
