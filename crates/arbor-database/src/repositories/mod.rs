//! Repository implementations for Arbor entities.

pub mod file;
pub mod folder;

pub use file::FileRepository;
pub use folder::FolderRepository;
