//! File record and upload services.

pub mod service;
pub mod upload;

pub use service::{FileService, RegisterFileRequest};
pub use upload::{UploadItem, UploadOutcome, UploadReport, UploadService};
