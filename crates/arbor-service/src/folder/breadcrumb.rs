//! Breadcrumb trail from the root down to a folder.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use arbor_core::error::AppError;
use arbor_core::result::AppResult;
use arbor_core::types::{FolderId, NodeRef};
use arbor_database::repositories::FolderRepository;
use arbor_entity::folder::Folder;

use crate::context::RequestContext;

/// Resolves ancestry paths for folders.
#[derive(Debug, Clone)]
pub struct BreadcrumbService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
}

impl BreadcrumbService {
    /// Creates a new breadcrumb service.
    pub fn new(folder_repo: Arc<FolderRepository>) -> Self {
        Self { folder_repo }
    }

    /// Return the folders from the outermost ancestor down to `folder_id`
    /// inclusive. The root itself yields an empty trail.
    ///
    /// The walk stops with `CycleDetected` if a folder repeats, and with an
    /// internal error if an ancestor is missing from the owner's namespace.
    pub async fn breadcrumbs(
        &self,
        ctx: &RequestContext,
        folder_id: Option<FolderId>,
    ) -> AppResult<Vec<Folder>> {
        let Some(folder_id) = folder_id else {
            return Ok(Vec::new());
        };

        let target = self
            .folder_repo
            .find_owned(folder_id, ctx.owner_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        let mut visited = HashSet::from([target.id]);
        let mut cursor = target.parent_id;
        let mut trail = VecDeque::from([target]);

        while let Some(parent_id) = cursor {
            if !visited.insert(parent_id) {
                return Err(AppError::cycle_detected(format!(
                    "Ancestry of folder {folder_id} loops at {parent_id}"
                ))
                .at_node(NodeRef::Folder(parent_id)));
            }

            let child_id = trail.front().map(|f| f.id).unwrap_or(folder_id);
            let parent = self
                .folder_repo
                .find_owned(parent_id, ctx.owner_id)
                .await?
                .ok_or_else(|| {
                    AppError::internal(format!(
                        "Folder {child_id} references missing parent {parent_id}"
                    ))
                    .at_node(NodeRef::Folder(child_id))
                })?;

            cursor = parent.parent_id;
            trail.push_front(parent);
        }

        Ok(trail.into())
    }
}
