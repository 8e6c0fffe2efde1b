//! References to nodes of the folder tree.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::{FileId, FolderId};

/// A folder or a file, identified by id.
///
/// Used to report where a tree operation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum NodeRef {
    /// A folder node.
    Folder(FolderId),
    /// A file node.
    File(FileId),
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Folder(id) => write!(f, "folder {id}"),
            Self::File(id) => write!(f, "file {id}"),
        }
    }
}
