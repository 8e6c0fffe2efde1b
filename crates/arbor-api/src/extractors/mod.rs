//! Custom Axum extractors.

pub mod json;
pub mod owner;

pub use json::ValidatedJson;
pub use owner::{OWNER_HEADER, Owner};
