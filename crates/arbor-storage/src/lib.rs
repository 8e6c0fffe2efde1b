//! # arbor-storage
//!
//! Blob store implementations for Arbor: the local filesystem backend used
//! in production and an in-memory backend.

pub mod keys;
pub mod providers;

pub use keys::{blob_key, is_owned_key, owner_prefix, sanitize_file_name};
pub use providers::{LocalBlobStore, MemoryBlobStore};
