//! # arbor-database
//!
//! SQLite connection management and the tree repositories that persist
//! folders and file records.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{FileRepository, FolderRepository};
