//! Leave balance accounting.
//!
//! This module implements the balance ledger:
//! - Leave categories and which of them are balance-tracked
//! - Inclusive calendar-day counting over a date range
//! - Per-user balance entries with underflow-guarded mutation
//! - Error types for ledger operations
//!
//! Everything here is pure arithmetic over its inputs; request status and
//! side effects live in [`crate::lifecycle`].

pub mod balance;
pub mod days;
pub mod error;

#[cfg(test)]
mod days_props;

pub use balance::{LeaveBalance, LeaveCategory};
pub use days::day_count;
pub use error::LedgerError;
