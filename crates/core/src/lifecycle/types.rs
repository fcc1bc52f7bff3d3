//! Domain types for the leave request lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use leavio_shared::types::{LeaveRequestId, UserId};

use crate::ledger::LeaveCategory;
use crate::lifecycle::notification::NotificationEvent;

/// Status of a leave request.
///
/// Requests are created in `Pending`. The admin-decision graph is fully
/// connected: every status is reachable from either of the other two, so
/// an admin can always correct an earlier decision. Only the creation
/// edge (nothing → `Pending`) is reserved for submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    /// Awaiting an admin decision.
    Pending,
    /// Approved; the day count has been debited from the owner's balance.
    Approved,
    /// Rejected with a reason; no balance is consumed.
    Rejected,
}

impl LeaveStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A leave request.
///
/// Mutated only by applying a [`Decision`] produced by the lifecycle
/// service; requests are never deleted, so history stays available for
/// audit and export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier, assigned at creation.
    pub id: LeaveRequestId,
    /// The user the leave belongs to.
    pub owner_id: UserId,
    /// Leave category.
    pub category: LeaveCategory,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Inclusive day count over `[start_date, end_date]`.
    pub day_count: u32,
    /// Optional free-text motivation supplied at submission.
    pub reason: Option<String>,
    /// Current lifecycle status.
    pub status: LeaveStatus,
    /// Present exactly when `status` is `Rejected`.
    pub rejection_reason: Option<String>,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
}

/// Admin decision applied to a pending or decided request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionAction {
    /// Approve the request, consuming balance.
    Approve,
    /// Reject the request with a reason, reversing any consumption.
    Reject,
    /// Put the request back to pending, reversing any consumption.
    Reset,
}

/// A balance mutation paired with a status transition.
///
/// Balance is consumed exactly once, when a request enters `Approved`,
/// and exactly reversed when it leaves `Approved`. Untracked categories
/// produce no adjustment at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceAdjustment {
    /// Consume days from the owner's balance.
    Debit {
        /// Category being debited.
        category: LeaveCategory,
        /// Whole days to consume.
        days: u32,
    },
    /// Return days to the owner's balance.
    Credit {
        /// Category being credited.
        category: LeaveCategory,
        /// Whole days to return.
        days: u32,
    },
}

/// The computed outcome of an admin decision.
///
/// A decision bundles the next status, the ledger delta, and the
/// notification to emit, so the store can apply all three as one atomic
/// unit or fail entirely with no partial effect.
#[derive(Debug, Clone)]
pub struct Decision {
    /// Status the request transitions to.
    pub new_status: LeaveStatus,
    /// Rejection reason after the transition (`None` unless rejecting).
    pub rejection_reason: Option<String>,
    /// Balance mutation to apply alongside the status flip, if any.
    pub adjustment: Option<BalanceAdjustment>,
    /// Notification directed at the request owner, if the edge emits one.
    pub notification: Option<NotificationEvent>,
}
