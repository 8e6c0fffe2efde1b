//! Folder management and breadcrumb services.

pub mod breadcrumb;
pub mod service;

pub use breadcrumb::BreadcrumbService;
pub use service::FolderService;
