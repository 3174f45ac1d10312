use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};

use ripple_core::ServiceError;

use crate::api::{AppState, identity, require_identity, text_body};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user/{userid}/feed", get(get_feed))
        .route("/search", post(search))
}

/// A user may only read their own feed.
async fn get_feed(
    State(svc): State<AppState>,
    Path(userid): Path<u64>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ServiceError> {
    if identity(&headers) != Some(userid) {
        return Err(ServiceError::Unauthorized("not your feed".into()));
    }
    let feed = svc.resolve_feed(userid).map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(feed).unwrap()))
}

/// Search the caller's own feed. The query is the plain-text request body.
async fn search(
    State(svc): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let caller = require_identity(&headers)?;
    let query = text_body(&headers, body)
        .ok_or_else(|| ServiceError::Validation("query must be plain text".into()))?;
    let hits = svc.search(caller, &query).map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(hits).unwrap()))
}
