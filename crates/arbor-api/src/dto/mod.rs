//! Data Transfer Objects for the HTTP API.

pub mod request;
pub mod response;
