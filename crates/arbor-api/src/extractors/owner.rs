//! `Owner` extractor: reads the asserted identity and builds the request
//! context.
//!
//! Authentication happens upstream. The identity provider (or the gateway
//! in front of this service) asserts the caller through a header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use arbor_core::error::AppError;
use arbor_core::types::OwnerId;
use arbor_service::RequestContext;

use crate::error::ApiError;

/// Header carrying the authenticated owner's id.
pub const OWNER_HEADER: &str = "x-owner-id";

/// Identity of the caller, available in handlers.
#[derive(Debug, Clone)]
pub struct Owner(pub RequestContext);

impl std::ops::Deref for Owner {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Owner
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing owner identity"))?;

        let owner_id: OwnerId = raw
            .trim()
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid owner identity"))?;

        Ok(Owner(RequestContext::new(owner_id)))
    }
}
