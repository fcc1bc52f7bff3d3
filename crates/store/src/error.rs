//! Error type for store operations.

use thiserror::Error;

use leavio_core::lifecycle::LifecycleError;
use leavio_shared::types::{NotificationId, UserId};

/// Errors returned by store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A lifecycle or ledger rule refused the operation.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// The email is already registered.
    #[error("email '{0}' is already registered")]
    EmailTaken(String),

    /// The referenced user does not exist.
    #[error("user {0} not found")]
    UserNotFound(UserId),

    /// The referenced notification does not exist for this user.
    #[error("notification {0} not found")]
    NotificationNotFound(NotificationId),
}

impl StoreError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Lifecycle(e) => e.status_code(),
            Self::EmailTaken(_) => 409,
            Self::UserNotFound(_) | Self::NotificationNotFound(_) => 404,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Lifecycle(e) => e.error_code(),
            Self::EmailTaken(_) => "EMAIL_TAKEN",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::NotificationNotFound(_) => "NOTIFICATION_NOT_FOUND",
        }
    }
}
