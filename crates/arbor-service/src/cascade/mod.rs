//! Deletion of files and whole folder subtrees, blobs included.

pub mod engine;
pub mod report;

pub use engine::CascadeService;
pub use report::DeletionReport;
