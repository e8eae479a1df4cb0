use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message addressed to a single user, with a read/unread state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Flip the read flag. Already-read notifications stay read.
    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

/// Input for creating a notification. The store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: i64,
    pub title: String,
    pub message: String,
}

impl NewNotification {
    pub fn new(user_id: i64, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Title and message must both carry text.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Notification title is required".to_string());
        }
        if self.message.trim().is_empty() {
            return Err("Notification message is required".to_string());
        }
        Ok(())
    }
}
