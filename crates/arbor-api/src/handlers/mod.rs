//! HTTP request handlers.

pub mod file;
pub mod folder;
pub mod health;

use std::str::FromStr;

use arbor_core::error::AppError;

/// Parse an id from a path segment. Malformed ids name nothing, so they are
/// reported as not found.
pub(crate) fn parse_path_id<T: FromStr>(raw: &str, entity: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::not_found(format!("{entity} {raw} not found")))
}
