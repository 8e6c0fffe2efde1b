//! Response DTOs.

use serde::{Deserialize, Serialize};

use arbor_core::types::FolderId;
use arbor_entity::file::File;
use arbor_entity::folder::Folder;
use arbor_service::{UploadOutcome, UploadReport};

use crate::error::status_and_code;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A folder scope as the browser shows it.
#[derive(Debug, Clone, Serialize)]
pub struct FolderView {
    /// The folder, or `None` at the root.
    pub folder: Option<Folder>,
    /// Ancestors from the root down to the folder.
    pub breadcrumbs: Vec<Folder>,
    /// Child folders.
    pub folders: Vec<Folder>,
    /// Files in the scope.
    pub files: Vec<File>,
}

/// One line of an upload response.
#[derive(Debug, Clone, Serialize)]
pub struct UploadItemResponse {
    /// Position in the submission.
    pub index: usize,
    /// `"stored"` or `"rejected"`.
    pub status: &'static str,
    /// The created file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<File>,
    /// Submitted name, for rejected items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Error code, for rejected items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    /// Reason, for rejected items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of a batch upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    /// Target folder, `None` for the root.
    pub folder_id: Option<FolderId>,
    /// Number of stored files.
    pub stored: usize,
    /// Number of rejected items.
    pub rejected: usize,
    /// Per-item results in submission order.
    pub items: Vec<UploadItemResponse>,
}

impl From<UploadReport> for UploadResponse {
    fn from(report: UploadReport) -> Self {
        let stored = report.stored().count();
        let rejected = report.rejected_count();
        let items = report
            .outcomes
            .into_iter()
            .map(|outcome| match outcome {
                UploadOutcome::Stored { index, file } => UploadItemResponse {
                    index,
                    status: "stored",
                    file: Some(file),
                    file_name: None,
                    error: None,
                    message: None,
                },
                UploadOutcome::Rejected {
                    index,
                    file_name,
                    error,
                    message,
                } => UploadItemResponse {
                    index,
                    status: "rejected",
                    file: None,
                    file_name,
                    error: Some(status_and_code(error).1),
                    message: Some(message),
                },
            })
            .collect();

        Self {
            folder_id: report.folder_id,
            stored,
            rejected,
            items,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Database reachability.
    pub database: String,
    /// Blob store reachability.
    pub storage: String,
}
