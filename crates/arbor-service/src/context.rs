//! Request context carrying the identity a request acts as.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use arbor_core::types::OwnerId;

/// Context for the current request.
///
/// Built by the presentation layer from the identity provider's assertion
/// and passed into every service method, so each operation knows *whose*
/// namespace it works in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The owner the request acts as.
    pub owner_id: OwnerId,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(owner_id: OwnerId) -> Self {
        Self {
            owner_id,
            request_time: Utc::now(),
        }
    }
}
