use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{delete, post, put};
use axum::{Json, Router};

use ripple_core::ServiceError;

use crate::api::{AppState, identity, text_body};
use crate::model::PostStatusUpdate;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/feeditem", post(post_status_update))
        .route("/feeditem/{itemid}", delete(delete_feed_item))
        .route("/feeditem/{itemid}/content", put(edit_contents))
        .route(
            "/feeditem/{itemid}/likelist/{userid}",
            put(like_item).delete(unlike_item),
        )
}

async fn post_status_update(
    State(svc): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<PostStatusUpdate>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<serde_json::Value>), ServiceError>
{
    let item = svc
        .post_status_update(identity(&headers), input)
        .map_err(ServiceError::from)?;
    let location = format!("/feeditem/{}", item.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(serde_json::to_value(item).unwrap()),
    ))
}

async fn delete_feed_item(
    State(svc): State<AppState>,
    Path(itemid): Path<u64>,
    headers: HeaderMap,
) -> Result<StatusCode, ServiceError> {
    svc.delete_feed_item(identity(&headers), itemid)
        .map_err(ServiceError::from)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn edit_contents(
    State(svc): State<AppState>,
    Path(itemid): Path<u64>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let body = text_body(&headers, body);
    let view = svc
        .edit_contents(identity(&headers), itemid, body)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(view).unwrap()))
}

async fn like_item(
    State(svc): State<AppState>,
    Path((itemid, userid)): Path<(u64, u64)>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let likes = svc
        .like_item(identity(&headers), itemid, userid)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(likes).unwrap()))
}

async fn unlike_item(
    State(svc): State<AppState>,
    Path((itemid, userid)): Path<(u64, u64)>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let likes = svc
        .unlike_item(identity(&headers), itemid, userid)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(likes).unwrap()))
}
