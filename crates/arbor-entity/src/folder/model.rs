//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use arbor_core::error::AppError;
use arbor_core::result::AppResult;
use arbor_core::types::{FolderId, OwnerId};

/// Longest folder name accepted, in characters.
pub const MAX_FOLDER_NAME_LEN: usize = 255;

/// A folder in an owner's hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (null for root-level folders).
    pub parent_id: Option<FolderId>,
    /// The folder owner.
    pub owner_id: OwnerId,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root-level folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Validated data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name, already trimmed.
    pub name: String,
    /// Parent folder (None for root).
    pub parent_id: Option<FolderId>,
    /// The folder owner.
    pub owner_id: OwnerId,
}

impl CreateFolder {
    /// Build a creation request, rejecting empty or over-long names.
    pub fn new(
        name: &str,
        parent_id: Option<FolderId>,
        owner_id: OwnerId,
    ) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }
        if name.chars().count() > MAX_FOLDER_NAME_LEN {
            return Err(AppError::validation(format!(
                "Folder name cannot exceed {MAX_FOLDER_NAME_LEN} characters"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            parent_id,
            owner_id,
        })
    }
}
