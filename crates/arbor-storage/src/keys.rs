//! Blob key layout.
//!
//! Keys are namespaced per owner so that two owners uploading the same file
//! name never collide: `user_<owner>/<file>/<name>`.

use arbor_core::error::AppError;
use arbor_core::result::AppResult;
use arbor_core::types::{FileId, OwnerId};

/// The key prefix under which every blob of `owner` lives.
pub fn owner_prefix(owner: OwnerId) -> String {
    format!("user_{owner}/")
}

/// Build the blob key for a file.
pub fn blob_key(owner: OwnerId, file_id: FileId, file_name: &str) -> String {
    format!("{}{file_id}/{file_name}", owner_prefix(owner))
}

/// Whether `key` addresses a blob inside `owner`'s area.
///
/// The remainder after the prefix must be made of plain segments, so keys
/// like `user_<owner>/../user_<other>/x` do not count.
pub fn is_owned_key(owner: OwnerId, key: &str) -> bool {
    key.strip_prefix(&owner_prefix(owner))
        .is_some_and(|rest| rest.split('/').all(|seg| !matches!(seg, "" | "." | "..")))
}

/// Reduce an uploaded file name to a safe base name.
///
/// Directory components from either separator are dropped, control
/// characters removed, and surrounding whitespace trimmed. Names that end up
/// empty, `.` or `..` are rejected.
pub fn sanitize_file_name(raw: &str) -> AppResult<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();

    match cleaned {
        "" | "." | ".." => Err(AppError::validation(format!(
            "Invalid file name: {raw:?}"
        ))),
        name => Ok(name.to_string()),
    }
}
