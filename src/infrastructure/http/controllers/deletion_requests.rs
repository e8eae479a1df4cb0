use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::domain::entities::{AccountDeletionRequest, Actor};
use crate::infrastructure::http::middleware::{ApiResult, AppState};

/// List deletion requests still awaiting a decision
pub async fn list_pending_requests(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<Vec<AccountDeletionRequest>>> {
    let requests = state.deletion_request_service.list_pending(&actor).await?;
    Ok(Json(requests))
}

pub async fn approve_request(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> ApiResult<Json<AccountDeletionRequest>> {
    let request = state.deletion_request_service.approve(&actor, id).await?;
    Ok(Json(request))
}

pub async fn reject_request(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> ApiResult<Json<AccountDeletionRequest>> {
    let request = state.deletion_request_service.reject(&actor, id).await?;
    Ok(Json(request))
}

/// Accept a raw user-deletion event (the user id as plain text) onto the
/// in-process queue. Parsing happens when the listener consumes it.
pub async fn publish_deletion_event(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    body: String,
) -> ApiResult<StatusCode> {
    tracing::debug!("{} published a user deletion event", actor.subject);
    state.deletion_request_queue.publish(body)?;
    Ok(StatusCode::ACCEPTED)
}
