use crate::domain::entities::{NewNotification, Notification};
use crate::domain::errors::DomainResult;

/// Repository for notification operations
#[async_trait::async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Insert a notification, assigning its id and creation timestamp
    async fn save(&self, notification: &NewNotification) -> DomainResult<Notification>;

    /// Persist changes to an existing notification
    async fn update(&self, notification: &Notification) -> DomainResult<Notification>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Notification>>;

    /// All notifications for a user, in insertion order
    async fn find_by_user_id(&self, user_id: i64) -> DomainResult<Vec<Notification>>;

    /// Unread notifications for a user, in insertion order
    async fn find_unread_by_user_id(&self, user_id: i64) -> DomainResult<Vec<Notification>>;

    /// Delete every notification of a user, returning how many were removed
    async fn delete_by_user_id(&self, user_id: i64) -> DomainResult<u64>;
}
