//! Direct contents of a folder scope.

use serde::{Deserialize, Serialize};

use crate::file::File;
use crate::folder::Folder;

/// The child folders and files of one scope (a folder or the owner's root).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderListing {
    /// Child folders, ordered by name.
    pub folders: Vec<Folder>,
    /// Files directly in the scope, ordered by name.
    pub files: Vec<File>,
}

impl FolderListing {
    /// Whether the scope has no children at all.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }
}
