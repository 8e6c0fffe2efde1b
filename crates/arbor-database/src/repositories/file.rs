//! File repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;

use arbor_core::error::{AppError, ErrorKind};
use arbor_core::result::AppResult;
use arbor_core::types::{FileId, FolderId, OwnerId};
use arbor_entity::file::{CreateFile, File};

/// Repository for file record CRUD and query operations.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: SqlitePool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a file by ID within an owner's namespace.
    pub async fn find_owned(&self, id: FileId, owner: OwnerId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// List files directly inside a folder, or at the owner's root when
    /// `folder_id` is `None`.
    pub async fn find_in_folder(
        &self,
        folder_id: Option<FolderId>,
        owner: OwnerId,
    ) -> AppResult<Vec<File>> {
        let query = match folder_id {
            Some(folder_id) => sqlx::query_as::<_, File>(
                "SELECT * FROM files WHERE owner_id = ? AND folder_id = ? \
                 ORDER BY name ASC, uploaded_at ASC",
            )
            .bind(owner)
            .bind(folder_id),
            None => sqlx::query_as::<_, File>(
                "SELECT * FROM files WHERE owner_id = ? AND folder_id IS NULL \
                 ORDER BY name ASC, uploaded_at ASC",
            )
            .bind(owner),
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// Create a new file record.
    ///
    /// The containing folder must exist in the owner's namespace; the check
    /// and the insert share one transaction.
    pub async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        if let Some(folder_id) = data.folder_id {
            let exists: Option<i64> =
                sqlx::query_scalar("SELECT 1 FROM folders WHERE id = ? AND owner_id = ?")
                    .bind(folder_id)
                    .bind(data.owner_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to find folder", e)
                    })?;
            if exists.is_none() {
                return Err(AppError::not_found(format!("Folder {folder_id} not found")));
            }
        }

        let file = sqlx::query_as::<_, File>(
            "INSERT INTO files (id, name, blob_ref, size_bytes, content_type, folder_id, owner_id, uploaded_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(&data.blob_ref)
        .bind(data.size_bytes)
        .bind(&data.content_type)
        .bind(data.folder_id)
        .bind(data.owner_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file record", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit file creation", e)
        })?;

        Ok(file)
    }

    /// Delete a file record. Returns `true` if a row was removed.
    pub async fn delete(&self, file_id: FileId, owner: OwnerId) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let result = sqlx::query("DELETE FROM files WHERE id = ? AND owner_id = ?")
            .bind(file_id)
            .bind(owner)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit file deletion", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Count an owner's file records.
    pub async fn count_for_owner(&self, owner: OwnerId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE owner_id = ?")
            .bind(owner)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))?;
        Ok(count as u64)
    }
}
