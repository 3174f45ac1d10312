mod comments;
mod debug;
mod feed;
mod identity;
mod items;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderMap, header};

use ripple_core::ServiceError;

use crate::service::FeedService;

pub use identity::identity;

/// Shared application state.
pub type AppState = Arc<FeedService>;

/// Build the complete feed API router.
///
/// Paths are absolute (`/feeditem`, `/search`, ...) — the binary merges
/// them at the root of its router.
pub fn build_router(svc: Arc<FeedService>) -> Router {
    Router::new()
        .merge(items::routes())
        .merge(comments::routes())
        .merge(feed::routes())
        .merge(debug::routes())
        .with_state(svc)
}

/// Extract a plain-text request body.
///
/// Some endpoints take raw text, not JSON, so schema validation cannot
/// apply; a body declared as JSON is structured data and gets rejected.
fn text_body(headers: &HeaderMap, body: String) -> Option<String> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if content_type.starts_with("application/json") {
        None
    } else {
        Some(body)
    }
}

/// Caller identity, required. Invalid credentials never match a real user,
/// so endpoints that need a caller fail closed with `Unauthorized`.
fn require_identity(headers: &HeaderMap) -> Result<crate::model::UserId, ServiceError> {
    identity(headers).ok_or_else(|| ServiceError::Unauthorized("invalid credential".into()))
}
