//! # arbor-service
//!
//! Business logic service layer for Arbor. Each service orchestrates the
//! tree repositories and the blob store to implement one use case.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references. The owner identity always
//! arrives explicitly in a [`RequestContext`].

pub mod cascade;
pub mod context;
pub mod file;
pub mod folder;

#[cfg(test)]
pub(crate) mod testing;

pub use cascade::{CascadeService, DeletionReport};
pub use context::RequestContext;
pub use file::{FileService, UploadItem, UploadOutcome, UploadReport, UploadService};
pub use folder::{BreadcrumbService, FolderService};
