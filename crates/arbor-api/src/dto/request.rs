//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use arbor_core::types::FolderId;

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(
        min = 1,
        max = 255,
        message = "Folder name must be 1 to 255 characters"
    ))]
    pub name: String,
    /// Parent folder, absent for the root.
    #[serde(default)]
    pub parent_id: Option<FolderId>,
}

/// Move folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MoveFolderRequest {
    /// New parent folder, absent to move to the root.
    #[serde(default)]
    pub parent_id: Option<FolderId>,
}

/// Body of every destructive request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ConfirmDeleteRequest {
    /// Must be `true`.
    #[serde(default)]
    #[validate(custom(function = "require_confirmation"))]
    pub confirm: bool,
}

fn require_confirmation(confirm: &bool) -> Result<(), ValidationError> {
    if *confirm {
        Ok(())
    } else {
        Err(ValidationError::new("confirm").with_message("Deletion must be confirmed".into()))
    }
}
