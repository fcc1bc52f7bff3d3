//! State transition logic for leave requests.
//!
//! Each transition is its own function that validates against the current
//! request and balance, then returns a [`Decision`] describing the next
//! status, the ledger delta, and the notification to emit. Nothing here
//! mutates anything; the store applies decisions atomically.

use chrono::{NaiveDate, Utc};

use leavio_shared::types::{LeaveRequestId, UserId};

use crate::ledger::{self, LeaveBalance, LeaveCategory, LedgerError};
use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::notification::NotificationEvent;
use crate::lifecycle::types::{BalanceAdjustment, Decision, LeaveRequest, LeaveStatus};

/// Input for submitting a new leave request.
#[derive(Debug, Clone)]
pub struct SubmitInput {
    /// The user the leave belongs to.
    pub owner_id: UserId,
    /// Leave category.
    pub category: LeaveCategory,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Optional free-text motivation.
    pub reason: Option<String>,
}

/// Stateless service owning the leave request state machine.
pub struct LifecycleService;

impl LifecycleService {
    /// Submits a new leave request.
    ///
    /// Validates the date range, computes the inclusive day count, and for
    /// tracked categories requires the owner's balance to cover it. The
    /// balance is *not* consumed here; consumption happens at approval.
    /// No notification is emitted for submission.
    ///
    /// # Errors
    ///
    /// * `LedgerError::InvalidRange` if `end_date` is before `start_date`
    /// * `LedgerError::InsufficientBalance` if a tracked category cannot
    ///   cover the requested days
    pub fn submit(input: SubmitInput, balance: &LeaveBalance) -> Result<LeaveRequest, LifecycleError> {
        let day_count = ledger::day_count(input.start_date, input.end_date)?;

        Self::check_sufficiency(balance, input.category, day_count)?;

        Ok(LeaveRequest {
            id: LeaveRequestId::new(),
            owner_id: input.owner_id,
            category: input.category,
            start_date: input.start_date,
            end_date: input.end_date,
            day_count,
            reason: input.reason.filter(|r| !r.trim().is_empty()),
            status: LeaveStatus::Pending,
            rejection_reason: None,
            created_at: Utc::now(),
        })
    }

    /// Approves a pending or rejected request.
    ///
    /// Sufficiency is re-validated against the balance passed in *now*,
    /// never a value cached at submission time: other approvals may have
    /// consumed balance in between. On success the decision debits the
    /// day count (for tracked categories), clears any rejection reason,
    /// and notifies the owner.
    ///
    /// # Errors
    ///
    /// * `LifecycleError::InvalidTransition` if already approved
    /// * `LedgerError::InsufficientBalance` if the current balance cannot
    ///   cover the request; the request stays unchanged
    pub fn approve(
        request: &LeaveRequest,
        balance: &LeaveBalance,
    ) -> Result<Decision, LifecycleError> {
        match request.status {
            LeaveStatus::Pending | LeaveStatus::Rejected => {
                Self::check_sufficiency(balance, request.category, request.day_count)?;

                // No balance was consumed in either prior state, so entering
                // Approved always debits once.
                let adjustment = request.category.is_tracked().then_some(
                    BalanceAdjustment::Debit {
                        category: request.category,
                        days: request.day_count,
                    },
                );

                Ok(Decision {
                    new_status: LeaveStatus::Approved,
                    rejection_reason: None,
                    adjustment,
                    notification: Some(NotificationEvent::approved(request.owner_id)),
                })
            }
            LeaveStatus::Approved => Err(LifecycleError::InvalidTransition {
                from: request.status,
                to: LeaveStatus::Approved,
            }),
        }
    }

    /// Rejects a pending or approved request.
    ///
    /// Requires a non-empty reason. Leaving `Approved` credits the day
    /// count back in the same decision, so a rejection is never observed
    /// with stale balance.
    ///
    /// # Errors
    ///
    /// * `LifecycleError::MissingReason` if the reason is empty
    /// * `LifecycleError::InvalidTransition` if already rejected
    pub fn reject(request: &LeaveRequest, reason: &str) -> Result<Decision, LifecycleError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(LifecycleError::MissingReason);
        }

        match request.status {
            LeaveStatus::Pending | LeaveStatus::Approved => Ok(Decision {
                new_status: LeaveStatus::Rejected,
                rejection_reason: Some(reason.to_string()),
                adjustment: Self::reversal_for(request),
                notification: Some(NotificationEvent::rejected(request.owner_id, reason)),
            }),
            LeaveStatus::Rejected => Err(LifecycleError::InvalidTransition {
                from: request.status,
                to: LeaveStatus::Rejected,
            }),
        }
    }

    /// Puts an approved or rejected request back to pending.
    ///
    /// Leaving `Approved` credits the day count back; leaving `Rejected`
    /// changes no balance because none was consumed. This edge emits no
    /// notification.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` if already pending.
    pub fn reset(request: &LeaveRequest) -> Result<Decision, LifecycleError> {
        match request.status {
            LeaveStatus::Approved | LeaveStatus::Rejected => Ok(Decision {
                new_status: LeaveStatus::Pending,
                rejection_reason: None,
                adjustment: Self::reversal_for(request),
                notification: None,
            }),
            LeaveStatus::Pending => Err(LifecycleError::InvalidTransition {
                from: request.status,
                to: LeaveStatus::Pending,
            }),
        }
    }

    /// Returns true if `from → to` is an edge of the decision graph.
    ///
    /// All three statuses are mutually reachable; only self-loops are
    /// excluded.
    #[must_use]
    pub fn is_valid_transition(from: LeaveStatus, to: LeaveStatus) -> bool {
        from != to
    }

    /// The credit reversing an earlier consumption, when leaving
    /// `Approved` with a tracked category.
    fn reversal_for(request: &LeaveRequest) -> Option<BalanceAdjustment> {
        (request.status == LeaveStatus::Approved && request.category.is_tracked()).then_some(
            BalanceAdjustment::Credit {
                category: request.category,
                days: request.day_count,
            },
        )
    }

    fn check_sufficiency(
        balance: &LeaveBalance,
        category: LeaveCategory,
        days: u32,
    ) -> Result<(), LifecycleError> {
        if balance.has_sufficient(category, days) {
            return Ok(());
        }

        Err(LedgerError::InsufficientBalance {
            category,
            requested: days,
            available: balance.remaining(category).unwrap_or(0),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn submit_input(category: LeaveCategory, days: u32) -> SubmitInput {
        let start = date(2024, 3, 1);
        SubmitInput {
            owner_id: UserId::new(),
            category,
            start_date: start,
            end_date: start + chrono::Duration::days(i64::from(days) - 1),
            reason: None,
        }
    }

    fn pending_request(category: LeaveCategory, days: u32) -> LeaveRequest {
        LifecycleService::submit(submit_input(category, days), &LeaveBalance::new(30, 15, 7))
            .unwrap()
    }

    #[test]
    fn test_submit_creates_pending_request() {
        let balance = LeaveBalance::new(10, 5, 3);
        let request =
            LifecycleService::submit(submit_input(LeaveCategory::Annual, 5), &balance).unwrap();

        assert_eq!(request.status, LeaveStatus::Pending);
        assert_eq!(request.day_count, 5);
        assert_eq!(request.rejection_reason, None);
    }

    #[test]
    fn test_submit_does_not_touch_balance() {
        // submit only validates; the decision that consumes balance is approval
        let balance = LeaveBalance::new(10, 5, 3);
        LifecycleService::submit(submit_input(LeaveCategory::Annual, 5), &balance).unwrap();
        assert_eq!(balance, LeaveBalance::new(10, 5, 3));
    }

    #[test]
    fn test_submit_rejects_reversed_range() {
        let input = SubmitInput {
            owner_id: UserId::new(),
            category: LeaveCategory::Annual,
            start_date: date(2024, 3, 5),
            end_date: date(2024, 3, 1),
            reason: None,
        };
        let result = LifecycleService::submit(input, &LeaveBalance::new(30, 15, 7));
        assert!(matches!(
            result,
            Err(LifecycleError::Ledger(LedgerError::InvalidRange { .. }))
        ));
    }

    #[test]
    fn test_submit_insufficient_balance() {
        let balance = LeaveBalance::new(30, 1, 7);
        let result = LifecycleService::submit(submit_input(LeaveCategory::Sick, 3), &balance);
        assert!(matches!(
            result,
            Err(LifecycleError::Ledger(LedgerError::InsufficientBalance {
                category: LeaveCategory::Sick,
                requested: 3,
                available: 1,
            }))
        ));
    }

    #[test]
    fn test_submit_other_category_skips_balance_check() {
        let balance = LeaveBalance::new(0, 0, 0);
        let request =
            LifecycleService::submit(submit_input(LeaveCategory::Other, 30), &balance).unwrap();
        assert_eq!(request.day_count, 30);
    }

    #[test]
    fn test_submit_blank_reason_becomes_none() {
        let mut input = submit_input(LeaveCategory::Annual, 2);
        input.reason = Some("   ".to_string());
        let request = LifecycleService::submit(input, &LeaveBalance::new(30, 15, 7)).unwrap();
        assert_eq!(request.reason, None);
    }

    #[test]
    fn test_approve_pending_debits_and_notifies() {
        let request = pending_request(LeaveCategory::Annual, 5);
        let decision =
            LifecycleService::approve(&request, &LeaveBalance::new(10, 5, 3)).unwrap();

        assert_eq!(decision.new_status, LeaveStatus::Approved);
        assert_eq!(decision.rejection_reason, None);
        assert_eq!(
            decision.adjustment,
            Some(BalanceAdjustment::Debit {
                category: LeaveCategory::Annual,
                days: 5,
            })
        );
        let notification = decision.notification.unwrap();
        assert_eq!(notification.recipient_id, request.owner_id);
    }

    #[test]
    fn test_approve_revalidates_current_balance() {
        // Sufficient at submission, drained before approval
        let request = pending_request(LeaveCategory::Annual, 5);
        let drained = LeaveBalance::new(2, 5, 3);
        let result = LifecycleService::approve(&request, &drained);
        assert!(matches!(
            result,
            Err(LifecycleError::Ledger(LedgerError::InsufficientBalance { .. }))
        ));
    }

    #[test]
    fn test_approve_rejected_request_debits_once() {
        let mut request = pending_request(LeaveCategory::Sick, 2);
        request.status = LeaveStatus::Rejected;
        request.rejection_reason = Some("overlap".to_string());

        let decision =
            LifecycleService::approve(&request, &LeaveBalance::new(10, 5, 3)).unwrap();
        // No balance was consumed while rejected, so approving debits
        assert_eq!(
            decision.adjustment,
            Some(BalanceAdjustment::Debit {
                category: LeaveCategory::Sick,
                days: 2,
            })
        );
        assert_eq!(decision.rejection_reason, None);
    }

    #[test]
    fn test_approve_already_approved_fails() {
        let mut request = pending_request(LeaveCategory::Annual, 5);
        request.status = LeaveStatus::Approved;
        let result = LifecycleService::approve(&request, &LeaveBalance::new(10, 5, 3));
        assert!(matches!(
            result,
            Err(LifecycleError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_approve_other_category_has_no_adjustment() {
        let request = pending_request(LeaveCategory::Other, 14);
        let decision =
            LifecycleService::approve(&request, &LeaveBalance::new(0, 0, 0)).unwrap();
        assert_eq!(decision.adjustment, None);
    }

    #[test]
    fn test_reject_pending_stores_reason_and_notifies() {
        let request = pending_request(LeaveCategory::Annual, 5);
        let decision = LifecycleService::reject(&request, "business need").unwrap();

        assert_eq!(decision.new_status, LeaveStatus::Rejected);
        assert_eq!(decision.rejection_reason.as_deref(), Some("business need"));
        // Pending never consumed balance, so nothing to reverse
        assert_eq!(decision.adjustment, None);
        assert!(
            decision
                .notification
                .unwrap()
                .message
                .contains("business need")
        );
    }

    #[test]
    fn test_reject_approved_credits_back() {
        let mut request = pending_request(LeaveCategory::Annual, 5);
        request.status = LeaveStatus::Approved;

        let decision = LifecycleService::reject(&request, "plans changed").unwrap();
        assert_eq!(
            decision.adjustment,
            Some(BalanceAdjustment::Credit {
                category: LeaveCategory::Annual,
                days: 5,
            })
        );
    }

    #[test]
    fn test_reject_requires_reason() {
        let request = pending_request(LeaveCategory::Annual, 5);
        assert!(matches!(
            LifecycleService::reject(&request, ""),
            Err(LifecycleError::MissingReason)
        ));
        assert!(matches!(
            LifecycleService::reject(&request, "   "),
            Err(LifecycleError::MissingReason)
        ));
    }

    #[test]
    fn test_reject_already_rejected_fails() {
        let mut request = pending_request(LeaveCategory::Annual, 5);
        request.status = LeaveStatus::Rejected;
        request.rejection_reason = Some("first".to_string());
        let result = LifecycleService::reject(&request, "second");
        assert!(matches!(
            result,
            Err(LifecycleError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_reset_approved_credits_back() {
        let mut request = pending_request(LeaveCategory::Personal, 3);
        request.status = LeaveStatus::Approved;

        let decision = LifecycleService::reset(&request).unwrap();
        assert_eq!(decision.new_status, LeaveStatus::Pending);
        assert_eq!(
            decision.adjustment,
            Some(BalanceAdjustment::Credit {
                category: LeaveCategory::Personal,
                days: 3,
            })
        );
        assert!(decision.notification.is_none());
    }

    #[test]
    fn test_reset_rejected_is_balance_neutral() {
        let mut request = pending_request(LeaveCategory::Annual, 5);
        request.status = LeaveStatus::Rejected;
        request.rejection_reason = Some("budget".to_string());

        let decision = LifecycleService::reset(&request).unwrap();
        assert_eq!(decision.adjustment, None);
        assert_eq!(decision.rejection_reason, None);
    }

    #[test]
    fn test_reset_pending_fails() {
        let request = pending_request(LeaveCategory::Annual, 5);
        assert!(matches!(
            LifecycleService::reset(&request),
            Err(LifecycleError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_transition_graph_is_fully_connected() {
        use LeaveStatus::{Approved, Pending, Rejected};
        for from in [Pending, Approved, Rejected] {
            for to in [Pending, Approved, Rejected] {
                assert_eq!(LifecycleService::is_valid_transition(from, to), from != to);
            }
        }
    }
}
