//! In-memory state for the leave tracker.
//!
//! [`Store`] is the single authority over users, leave requests, and
//! notifications. Lifecycle decisions computed by `leavio-core` are
//! applied here atomically: a decision either lands in full (status,
//! balance delta, version bump) or fails with no partial effect.
//!
//! Concurrency contract:
//! - one writer per leave request at a time (exclusive map guard)
//! - balance mutations for a user are exclusive with each other
//! - guards are always taken in request then user order
//! - an optional `expected_version` check rejects decisions made
//!   against stale reads

mod error;
mod leaves;
mod notifications;
pub mod seed;
mod users;

use dashmap::DashMap;

use leavio_shared::types::{LeaveRequestId, NotificationId, UserId};

pub use error::StoreError;
pub use leaves::LeaveRecord;
pub use notifications::Notification;
pub use users::UserRecord;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The in-memory store.
///
/// Cheap to share behind an `Arc`; all maps are concurrent.
#[derive(Debug, Default)]
pub struct Store {
    users: DashMap<UserId, UserRecord>,
    emails: DashMap<String, UserId>,
    requests: DashMap<LeaveRequestId, leaves::VersionedRequest>,
    notifications: DashMap<NotificationId, Notification>,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
