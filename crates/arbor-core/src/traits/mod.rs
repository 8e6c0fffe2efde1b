//! Core traits defined in `arbor-core` and implemented by other crates.

pub mod storage;

pub use storage::BlobStore;
