//! Summary of a completed deletion.

use serde::Serialize;

use arbor_core::types::FolderId;

/// What a deletion removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionReport {
    /// Parent of the deleted node (`None` at the root), for redirecting the
    /// caller to the surviving location.
    pub parent_folder_id: Option<FolderId>,
    /// Folder records removed.
    pub folders_deleted: u64,
    /// File records removed.
    pub files_deleted: u64,
    /// Files whose blob was already gone.
    pub blobs_missing: u64,
}

impl DeletionReport {
    pub(crate) fn new(parent_folder_id: Option<FolderId>) -> Self {
        Self {
            parent_folder_id,
            ..Self::default()
        }
    }
}
