use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::domain::entities::{NewNotification, Notification};
use crate::infrastructure::http::middleware::{ApiError, ApiResult, AppState};

// Request DTOs
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub message: Option<String>,
}

impl TryFrom<CreateNotificationRequest> for NewNotification {
    type Error = ApiError;

    fn try_from(request: CreateNotificationRequest) -> Result<Self, Self::Error> {
        let user_id = request
            .user_id
            .ok_or_else(|| ApiError::BadRequest("userId is required".to_string()))?;
        let notification = NewNotification::new(
            user_id,
            request.title.unwrap_or_default(),
            request.message.unwrap_or_default(),
        );
        notification.validate().map_err(ApiError::BadRequest)?;
        Ok(notification)
    }
}

/// Create a notification for a user
pub async fn create_notification(
    State(state): State<AppState>,
    Json(request): Json<CreateNotificationRequest>,
) -> ApiResult<Json<Notification>> {
    let notification = NewNotification::try_from(request)?;
    let created = state.notification_service.create(notification).await?;
    Ok(Json(created))
}

/// List every notification of a user
pub async fn list_notifications_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<Notification>>> {
    let notifications = state.notification_service.list_by_user(user_id).await?;
    Ok(Json(notifications))
}

/// List the unread notifications of a user
pub async fn list_unread_notifications_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<Notification>>> {
    let notifications = state
        .notification_service
        .list_unread_by_user(user_id)
        .await?;
    Ok(Json(notifications))
}

/// Mark a notification as read
pub async fn mark_notification_as_read(
    State(state): State<AppState>,
    Path(notification_id): Path<i64>,
) -> ApiResult<Json<Notification>> {
    let notification = state
        .notification_service
        .mark_as_read(notification_id)
        .await?;
    Ok(Json(notification))
}

/// Delete every notification of a user
pub async fn delete_notifications_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.notification_service.delete_by_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
