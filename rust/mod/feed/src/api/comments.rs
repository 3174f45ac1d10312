use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{post, put};
use axum::{Json, Router};

use ripple_core::ServiceError;

use crate::api::{AppState, identity};
use crate::model::PostComment;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/feeditem/{itemid}/comment", post(post_comment))
        .route(
            "/feeditem/{itemid}/comment/{commentid}/likelist/{userid}",
            put(like_comment).delete(unlike_comment),
        )
}

async fn post_comment(
    State(svc): State<AppState>,
    Path(itemid): Path<u64>,
    headers: HeaderMap,
    Json(input): Json<PostComment>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let item = svc
        .post_comment(identity(&headers), itemid, input)
        .map_err(ServiceError::from)?;
    Ok((StatusCode::CREATED, Json(serde_json::to_value(item).unwrap())))
}

async fn like_comment(
    State(svc): State<AppState>,
    Path((itemid, commentid, userid)): Path<(u64, u64, u64)>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let view = svc
        .like_comment(identity(&headers), itemid, commentid, userid)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(view).unwrap()))
}

async fn unlike_comment(
    State(svc): State<AppState>,
    Path((itemid, commentid, userid)): Path<(u64, u64, u64)>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let view = svc
        .unlike_comment(identity(&headers), itemid, commentid, userid)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(view).unwrap()))
}
