//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use arbor_core::config::AppConfig;
use arbor_core::traits::BlobStore;
use arbor_database::DatabasePool;
use arbor_database::repositories::{FileRepository, FolderRepository};
use arbor_service::{
    BreadcrumbService, CascadeService, FileService, FolderService, UploadService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// SQLite connection pool
    pub db: DatabasePool,
    /// Blob store for file content
    pub blobs: Arc<dyn BlobStore>,

    // ── Services ─────────────────────────────────────────────
    /// Folder create/list/move
    pub folder_service: Arc<FolderService>,
    /// Ancestry trails
    pub breadcrumb_service: Arc<BreadcrumbService>,
    /// File lookup and download
    pub file_service: Arc<FileService>,
    /// Batch uploads
    pub upload_service: Arc<UploadService>,
    /// File and subtree deletion
    pub cascade_service: Arc<CascadeService>,
}

impl AppState {
    /// Wire repositories and services over a database and a blob store.
    pub fn new(config: AppConfig, db: DatabasePool, blobs: Arc<dyn BlobStore>) -> Self {
        let folder_repo = Arc::new(FolderRepository::new(db.pool().clone()));
        let file_repo = Arc::new(FileRepository::new(db.pool().clone()));

        let file_service = FileService::new(Arc::clone(&file_repo), Arc::clone(&blobs));
        let upload_service = UploadService::new(
            file_service.clone(),
            Arc::clone(&folder_repo),
            Arc::clone(&blobs),
            config.storage.clone(),
        );

        Self {
            folder_service: Arc::new(FolderService::new(
                Arc::clone(&folder_repo),
                Arc::clone(&file_repo),
            )),
            breadcrumb_service: Arc::new(BreadcrumbService::new(Arc::clone(&folder_repo))),
            cascade_service: Arc::new(CascadeService::new(
                Arc::clone(&folder_repo),
                Arc::clone(&file_repo),
                Arc::clone(&blobs),
            )),
            file_service: Arc::new(file_service),
            upload_service: Arc::new(upload_service),
            config: Arc::new(config),
            db,
            blobs,
        }
    }
}
