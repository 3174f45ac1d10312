use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;

use ripple_core::ServiceError;

use crate::api::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/resetdb", post(reset_db))
}

/// Restore the fixture database.
///
/// Debug endpoint: callable by anyone, with no body, no credential, and no
/// validation. This is a documented hazard of the debug surface, not an
/// oversight — do not expose it to untrusted networks.
async fn reset_db(State(svc): State<AppState>) -> Result<StatusCode, ServiceError> {
    tracing::warn!("resetting database to fixture state");
    svc.reset().map_err(ServiceError::from)?;
    Ok(StatusCode::OK)
}
