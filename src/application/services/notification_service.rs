use crate::domain::entities::{NewNotification, Notification};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::notification_repository::NotificationRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationService {
    notification_repo: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    pub fn new(notification_repo: Arc<dyn NotificationRepository>) -> Self {
        Self { notification_repo }
    }

    /// Store a notification. Presence of fields is checked at the boundary.
    #[tracing::instrument(skip(self, notification), fields(user_id = notification.user_id))]
    pub async fn create(&self, notification: NewNotification) -> DomainResult<Notification> {
        let created = self.notification_repo.save(&notification).await?;

        metrics::counter!("notifications_created_total").increment(1);
        tracing::info!(
            "Notification {} created for user {}",
            created.id,
            created.user_id
        );

        Ok(created)
    }

    pub async fn list_by_user(&self, user_id: i64) -> DomainResult<Vec<Notification>> {
        self.notification_repo.find_by_user_id(user_id).await
    }

    pub async fn list_unread_by_user(&self, user_id: i64) -> DomainResult<Vec<Notification>> {
        self.notification_repo.find_unread_by_user_id(user_id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn mark_as_read(&self, id: i64) -> DomainResult<Notification> {
        let mut notification = self
            .notification_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Notification with ID {} not found", id)))?;

        notification.mark_read();
        let updated = self.notification_repo.update(&notification).await?;

        metrics::counter!("notifications_read_total").increment(1);
        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_by_user(&self, user_id: i64) -> DomainResult<u64> {
        let deleted = self.notification_repo.delete_by_user_id(user_id).await?;

        metrics::counter!("notifications_deleted_total").increment(deleted);
        tracing::info!("Deleted {} notifications for user {}", deleted, user_id);

        Ok(deleted)
    }
}
