//! Leave request lifecycle engine.
//!
//! Pure state machine over `pending | approved | rejected` with one
//! transition function per decision edge. Transitions never mutate; they
//! return [`Decision`] values the store applies atomically.

pub mod error;
pub mod notification;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::LifecycleError;
pub use notification::NotificationEvent;
pub use service::{LifecycleService, SubmitInput};
pub use types::{BalanceAdjustment, Decision, DecisionAction, LeaveRequest, LeaveStatus};
