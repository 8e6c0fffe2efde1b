//! Core type definitions used across the Arbor workspace.

pub mod id;
pub mod node;

pub use id::*;
pub use node::NodeRef;
