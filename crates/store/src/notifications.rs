//! Stored notifications and read-acknowledgement.

use chrono::{DateTime, Utc};
use serde::Serialize;

use leavio_core::lifecycle::NotificationEvent;
use leavio_shared::types::{NotificationId, UserId};

use crate::{Store, StoreError, StoreResult};

/// A notification delivered to a user's inbox.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    /// Unique identifier.
    pub id: NotificationId,
    /// The user the notification belongs to.
    pub recipient_id: UserId,
    /// Human-readable message.
    pub message: String,
    /// When the originating transition emitted it.
    pub created_at: DateTime<Utc>,
    /// Whether the recipient has acknowledged it.
    pub read: bool,
}

impl From<NotificationEvent> for Notification {
    fn from(event: NotificationEvent) -> Self {
        Self {
            id: NotificationId::new(),
            recipient_id: event.recipient_id,
            message: event.message,
            created_at: event.created_at,
            read: event.read,
        }
    }
}

impl Store {
    /// Records a notification emitted by a lifecycle transition.
    pub(crate) fn push_notification(&self, event: NotificationEvent) {
        let notification = Notification::from(event);
        tracing::debug!(
            notification_id = %notification.id,
            user_id = %notification.recipient_id,
            "notification recorded"
        );
        self.notifications.insert(notification.id, notification);
    }

    /// All notifications for `user_id`, newest first.
    #[must_use]
    pub fn notifications_for(&self, user_id: UserId) -> Vec<Notification> {
        let mut items: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|n| n.recipient_id == user_id)
            .map(|n| n.clone())
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }

    /// Marks one of `user_id`'s notifications as read.
    ///
    /// A notification belonging to someone else is reported as not found
    /// rather than revealing its existence.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotificationNotFound` if absent or owned by
    /// another user.
    pub fn mark_notification_read(
        &self,
        user_id: UserId,
        id: NotificationId,
    ) -> StoreResult<Notification> {
        let mut entry = self
            .notifications
            .get_mut(&id)
            .ok_or(StoreError::NotificationNotFound(id))?;
        if entry.recipient_id != user_id {
            return Err(StoreError::NotificationNotFound(id));
        }
        entry.read = true;
        Ok(entry.clone())
    }
}
