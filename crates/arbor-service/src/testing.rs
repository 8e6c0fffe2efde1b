//! Shared fixtures for service tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use sqlx::SqlitePool;

use arbor_core::config::StorageConfig;
use arbor_core::error::AppError;
use arbor_core::result::AppResult;
use arbor_core::traits::BlobStore;
use arbor_core::types::{FolderId, OwnerId};
use arbor_database::DatabasePool;
use arbor_database::repositories::{FileRepository, FolderRepository};
use arbor_entity::file::File;
use arbor_entity::folder::{CreateFolder, Folder};
use arbor_storage::MemoryBlobStore;

use crate::cascade::CascadeService;
use crate::context::RequestContext;
use crate::file::{FileService, UploadItem, UploadService};
use crate::folder::{BreadcrumbService, FolderService};

/// Every service wired against one in-memory database.
pub(crate) struct Fixture {
    pub pool: SqlitePool,
    pub blobs: Arc<dyn BlobStore>,
    pub folder_repo: Arc<FolderRepository>,
    pub file_repo: Arc<FileRepository>,
    pub folders: FolderService,
    pub files: FileService,
    pub uploads: UploadService,
    pub breadcrumbs: BreadcrumbService,
    pub cascade: CascadeService,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::build(Arc::new(MemoryBlobStore::new()), StorageConfig::default()).await
    }

    pub async fn with_store(blobs: Arc<dyn BlobStore>) -> Self {
        Self::build(blobs, StorageConfig::default()).await
    }

    pub async fn with_config(config: StorageConfig) -> Self {
        Self::build(Arc::new(MemoryBlobStore::new()), config).await
    }

    async fn build(blobs: Arc<dyn BlobStore>, config: StorageConfig) -> Self {
        let db = DatabasePool::connect_in_memory().await.unwrap();
        let pool = db.into_pool();
        let folder_repo = Arc::new(FolderRepository::new(pool.clone()));
        let file_repo = Arc::new(FileRepository::new(pool.clone()));
        let files = FileService::new(file_repo.clone(), blobs.clone());

        Self {
            folders: FolderService::new(folder_repo.clone(), file_repo.clone()),
            uploads: UploadService::new(files.clone(), folder_repo.clone(), blobs.clone(), config),
            breadcrumbs: BreadcrumbService::new(folder_repo.clone()),
            cascade: CascadeService::new(folder_repo.clone(), file_repo.clone(), blobs.clone()),
            files,
            pool,
            blobs,
            folder_repo,
            file_repo,
        }
    }

    /// A context for a fresh owner.
    pub fn ctx(&self) -> RequestContext {
        RequestContext::new(OwnerId::new())
    }

    pub async fn mkdir(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent: Option<FolderId>,
    ) -> Folder {
        self.folders.create_folder(ctx, name, parent).await.unwrap()
    }

    pub async fn upload(
        &self,
        ctx: &RequestContext,
        folder: Option<FolderId>,
        name: &str,
        data: &[u8],
    ) -> File {
        let report = self
            .uploads
            .upload(ctx, folder, vec![item(name, data)])
            .await
            .unwrap();
        report.stored().next().cloned().unwrap()
    }
}

pub(crate) fn item(name: &str, data: &[u8]) -> UploadItem {
    UploadItem {
        file_name: Some(name.to_string()),
        content_type: Some("text/plain".to_string()),
        data: Some(Bytes::copy_from_slice(data)),
    }
}

/// Memory store whose deletes fail for chosen keys.
#[derive(Debug, Default)]
pub(crate) struct FlakyBlobStore {
    pub inner: MemoryBlobStore,
    failing: Mutex<HashSet<String>>,
}

impl FlakyBlobStore {
    pub fn fail_delete(&self, key: &str) {
        self.failing.lock().unwrap().insert(key.to_string());
    }

    pub fn heal(&self, key: &str) {
        self.failing.lock().unwrap().remove(key);
    }
}

#[async_trait]
impl BlobStore for FlakyBlobStore {
    fn provider_type(&self) -> &str {
        "flaky"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, key: &str, data: Bytes) -> AppResult<()> {
        self.inner.put(key, data).await
    }

    async fn get(&self, key: &str) -> AppResult<Bytes> {
        self.inner.get(key).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let failing = self.failing.lock().unwrap().contains(key);
        if failing {
            return Err(AppError::storage(format!("Injected failure deleting {key}")));
        }
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }
}

/// Memory store that creates a folder the first time a chosen blob is
/// deleted, standing in for a request landing mid-cascade.
#[derive(Debug, Default)]
pub(crate) struct IntrudingBlobStore {
    pub inner: MemoryBlobStore,
    armed: Mutex<Option<(String, Arc<FolderRepository>, CreateFolder)>>,
}

impl IntrudingBlobStore {
    pub fn arm(&self, key: &str, repo: Arc<FolderRepository>, folder: CreateFolder) {
        *self.armed.lock().unwrap() = Some((key.to_string(), repo, folder));
    }
}

#[async_trait]
impl BlobStore for IntrudingBlobStore {
    fn provider_type(&self) -> &str {
        "intruding"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, key: &str, data: Bytes) -> AppResult<()> {
        self.inner.put(key, data).await
    }

    async fn get(&self, key: &str) -> AppResult<Bytes> {
        self.inner.get(key).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let fired = {
            let mut armed = self.armed.lock().unwrap();
            match armed.as_ref() {
                Some((trigger, _, _)) if trigger == key => armed.take(),
                _ => None,
            }
        };
        if let Some((_, repo, folder)) = fired {
            repo.create(&folder).await?;
        }
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }
}
