//! Blob store trait for the physical content behind file records.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for blob storage backends.
///
/// Blobs are addressed by an opaque key (the file record's `blob_ref`).
/// The [`BlobStore`] trait is defined here in `arbor-core` and implemented
/// in `arbor-storage`.
///
/// Absence is always reported as an `ErrorKind::NotFound` error, including
/// from [`BlobStore::delete`]. Callers that want idempotent deletion treat
/// that kind as success.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend type name (e.g., "local", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the backend is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store `data` under `key`, replacing any existing blob.
    async fn put(&self, key: &str, data: Bytes) -> AppResult<()>;

    /// Read the complete blob stored under `key`.
    async fn get(&self, key: &str) -> AppResult<Bytes>;

    /// Delete the blob stored under `key`.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether a blob exists under `key`.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}
