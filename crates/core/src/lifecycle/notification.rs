//! Notification events emitted by lifecycle transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use leavio_shared::types::UserId;

/// A notification directed at a request owner.
///
/// The lifecycle engine decides *that* a notification must be emitted and
/// what it says; delivery and the read flag belong to the surrounding
/// system. Emission is fire-and-forget relative to the transition itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// The user the notification is addressed to.
    pub recipient_id: UserId,
    /// Human-readable message.
    pub message: String,
    /// When the transition emitted the event.
    pub created_at: DateTime<Utc>,
    /// Read-acknowledgement flag, mutated externally.
    pub read: bool,
}

impl NotificationEvent {
    /// Builds the notification for an approved request.
    #[must_use]
    pub fn approved(recipient_id: UserId) -> Self {
        Self {
            recipient_id,
            message: "Your leave request has been approved".to_string(),
            created_at: Utc::now(),
            read: false,
        }
    }

    /// Builds the notification for a rejected request.
    #[must_use]
    pub fn rejected(recipient_id: UserId, reason: &str) -> Self {
        Self {
            recipient_id,
            message: format!("Your leave request has been rejected: {reason}"),
            created_at: Utc::now(),
            read: false,
        }
    }
}
