//! Error types for lifecycle operations.

use thiserror::Error;

use leavio_shared::types::LeaveRequestId;

use crate::ledger::LedgerError;
use crate::lifecycle::types::LeaveStatus;

/// Errors that can occur during lifecycle operations.
///
/// Every failure is reported to the immediate caller and leaves the
/// request and balance in their prior, valid state; nothing is downgraded
/// to a no-op and nothing retries internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// A ledger validation or mutation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Rejection attempted without a reason.
    #[error("a rejection reason is required")]
    MissingReason,

    /// The decision does not correspond to an edge of the status graph.
    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: LeaveStatus,
        /// The attempted target status.
        to: LeaveStatus,
    },

    /// The referenced request does not exist.
    #[error("leave request {0} not found")]
    NotFound(LeaveRequestId),

    /// The request changed since the caller read it; retry against the
    /// fresh state.
    #[error("leave request was modified concurrently (expected version {expected}, found {actual})")]
    Conflict {
        /// The version the caller decided against.
        expected: u64,
        /// The version currently stored.
        actual: u64,
    },
}

impl LifecycleError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Ledger(e) => e.status_code(),
            Self::MissingReason | Self::InvalidTransition { .. } => 400,
            Self::NotFound(_) => 404,
            Self::Conflict { .. } => 409,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Ledger(e) => e.error_code(),
            Self::MissingReason => "MISSING_REASON",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotFound(_) => "REQUEST_NOT_FOUND",
            Self::Conflict { .. } => "CONCURRENT_MODIFICATION",
        }
    }
}
