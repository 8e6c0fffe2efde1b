//! Folder repository implementation.
//!
//! Every query is scoped to an owner: a folder owned by someone else is
//! indistinguishable from one that does not exist.

use std::collections::HashSet;

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use arbor_core::error::{AppError, ErrorKind};
use arbor_core::result::AppResult;
use arbor_core::types::{FolderId, OwnerId};
use arbor_entity::folder::{CreateFolder, Folder};

/// Repository for folder CRUD and tree queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: SqlitePool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a folder by ID within an owner's namespace.
    pub async fn find_owned(&self, id: FolderId, owner: OwnerId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// List an owner's root-level folders.
    pub async fn find_roots(&self, owner: OwnerId) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = ? AND parent_id IS NULL \
             ORDER BY name ASC, created_at ASC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list root folders", e))
    }

    /// List direct child folders of a folder.
    pub async fn find_children(&self, parent_id: FolderId, owner: OwnerId) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = ? AND parent_id = ? \
             ORDER BY name ASC, created_at ASC",
        )
        .bind(owner)
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    /// IDs of the direct child folders of a folder.
    pub async fn child_ids(&self, parent_id: FolderId, owner: OwnerId) -> AppResult<Vec<FolderId>> {
        sqlx::query_scalar::<_, FolderId>(
            "SELECT id FROM folders WHERE owner_id = ? AND parent_id = ? \
             ORDER BY name ASC, created_at ASC",
        )
        .bind(owner)
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list child ids", e))
    }

    /// Create a new folder.
    ///
    /// The parent lookup and the insert share one transaction, so a parent
    /// deleted concurrently cannot end up with a new child.
    pub async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        if let Some(parent_id) = data.parent_id {
            if find_owned_in(&mut tx, parent_id, data.owner_id).await?.is_none() {
                return Err(AppError::not_found(format!(
                    "Parent folder {parent_id} not found"
                )));
            }
        }

        let folder = sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (id, name, parent_id, owner_id, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(FolderId::new())
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(data.owner_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit folder creation", e)
        })?;

        Ok(folder)
    }

    /// Re-point a folder at a new parent (or the root when `None`).
    ///
    /// Walks upward from the proposed parent inside the same transaction and
    /// refuses the change if it reaches `folder_id`.
    pub async fn reparent(
        &self,
        folder_id: FolderId,
        new_parent_id: Option<FolderId>,
        owner: OwnerId,
    ) -> AppResult<Folder> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        if find_owned_in(&mut tx, folder_id, owner).await?.is_none() {
            return Err(AppError::not_found(format!("Folder {folder_id} not found")));
        }

        if let Some(parent_id) = new_parent_id {
            let mut visited = HashSet::new();
            let mut cursor = Some(parent_id);
            while let Some(current) = cursor {
                if current == folder_id {
                    return Err(AppError::cycle_detected(format!(
                        "Cannot move folder {folder_id} beneath its own subtree"
                    )));
                }
                if !visited.insert(current) {
                    return Err(AppError::cycle_detected(format!(
                        "Parent chain of folder {parent_id} loops at {current}"
                    )));
                }
                let ancestor = find_owned_in(&mut tx, current, owner)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("Folder {current} not found")))?;
                cursor = ancestor.parent_id;
            }
        }

        let folder = sqlx::query_as::<_, Folder>(
            "UPDATE folders SET parent_id = ? WHERE id = ? AND owner_id = ? RETURNING *",
        )
        .bind(new_parent_id)
        .bind(folder_id)
        .bind(owner)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move folder", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit folder move", e)
        })?;

        Ok(folder)
    }

    /// Delete a single folder record. Returns `true` if a row was removed.
    ///
    /// The database refuses to delete a folder that still has child folders
    /// or files; callers must empty it first.
    pub async fn delete(&self, folder_id: FolderId, owner: OwnerId) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let result = sqlx::query("DELETE FROM folders WHERE id = ? AND owner_id = ?")
            .bind(folder_id)
            .bind(owner)
            .execute(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    AppError::with_source(
                        ErrorKind::Database,
                        format!("Folder {folder_id} still has children"),
                        e,
                    )
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to delete folder", e),
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit folder deletion", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Count an owner's folders.
    pub async fn count_for_owner(&self, owner: OwnerId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM folders WHERE owner_id = ?")
            .bind(owner)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count folders", e))?;
        Ok(count as u64)
    }
}

/// Owner-scoped folder lookup on an open connection or transaction.
async fn find_owned_in(
    conn: &mut SqliteConnection,
    id: FolderId,
    owner: OwnerId,
) -> AppResult<Option<Folder>> {
    sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = ? AND owner_id = ?")
        .bind(id)
        .bind(owner)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
}
