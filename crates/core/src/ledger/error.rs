//! Error types for balance ledger operations.

use chrono::NaiveDate;
use thiserror::Error;

use crate::ledger::balance::LeaveCategory;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The requested date range ends before it starts.
    #[error("invalid date range: {end} is before {start}")]
    InvalidRange {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },

    /// The requested days exceed the remaining balance.
    #[error("insufficient {category} balance: requested {requested} days, {available} available")]
    InsufficientBalance {
        /// The leave category being drawn from.
        category: LeaveCategory,
        /// The number of days requested.
        requested: u32,
        /// The remaining balance at validation time.
        available: u32,
    },

    /// A debit would drive the balance negative.
    ///
    /// Unreachable when sufficiency is validated first; guarded at the
    /// mutation boundary regardless. Callers must refuse the transition
    /// rather than clamp.
    #[error("balance underflow on {category}: cannot debit {debit} days from {available}")]
    BalanceUnderflow {
        /// The leave category being debited.
        category: LeaveCategory,
        /// The attempted debit in days.
        debit: u32,
        /// The remaining balance before the debit.
        available: u32,
    },
}

impl LedgerError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRange { .. } => 400,
            Self::InsufficientBalance { .. } => 422,
            Self::BalanceUnderflow { .. } => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => "INVALID_RANGE",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::BalanceUnderflow { .. } => "BALANCE_UNDERFLOW",
        }
    }
}
