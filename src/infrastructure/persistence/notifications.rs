use chrono::{SubsecRound, Utc};
use sqlx::{any::AnyRow, Row};

use super::{format_timestamp, parse_timestamp, Database};
use crate::domain::entities::{NewNotification, Notification};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::notification_repository::NotificationRepository;

fn notification_from_row(row: &AnyRow) -> DomainResult<Notification> {
    let is_read: i64 = row.try_get("is_read")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(Notification {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        message: row.try_get("message")?,
        read: is_read != 0,
        created_at: parse_timestamp(&created_at)?,
    })
}

#[async_trait::async_trait]
impl NotificationRepository for Database {
    async fn save(&self, notification: &NewNotification) -> DomainResult<Notification> {
        let created_at = Utc::now().trunc_subsecs(6);

        let row = sqlx::query(
            "INSERT INTO notifications (user_id, title, message, is_read, created_at)
             VALUES (?, ?, ?, 0, ?)
             RETURNING id",
        )
        .bind(notification.user_id)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(format_timestamp(&created_at))
        .fetch_one(&self.pool)
        .await?;

        Ok(Notification {
            id: row.try_get("id")?,
            user_id: notification.user_id,
            title: notification.title.clone(),
            message: notification.message.clone(),
            read: false,
            created_at,
        })
    }

    async fn update(&self, notification: &Notification) -> DomainResult<Notification> {
        let result = sqlx::query(
            "UPDATE notifications
             SET title = ?, message = ?, is_read = ?
             WHERE id = ?",
        )
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(i64::from(notification.read))
        .bind(notification.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!(
                "Notification with ID {} not found",
                notification.id
            )));
        }

        Ok(notification.clone())
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Notification>> {
        let row = sqlx::query(
            "SELECT id, user_id, title, message, is_read, created_at
             FROM notifications
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(notification_from_row).transpose()
    }

    async fn find_by_user_id(&self, user_id: i64) -> DomainResult<Vec<Notification>> {
        let rows = sqlx::query(
            "SELECT id, user_id, title, message, is_read, created_at
             FROM notifications
             WHERE user_id = ?
             ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(notification_from_row).collect()
    }

    async fn find_unread_by_user_id(&self, user_id: i64) -> DomainResult<Vec<Notification>> {
        let rows = sqlx::query(
            "SELECT id, user_id, title, message, is_read, created_at
             FROM notifications
             WHERE user_id = ? AND is_read = 0
             ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(notification_from_row).collect()
    }

    async fn delete_by_user_id(&self, user_id: i64) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM notifications WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
