//! Property-based tests for the lifecycle engine.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use leavio_shared::types::UserId;

use crate::ledger::{LeaveBalance, LeaveCategory};
use crate::lifecycle::service::{LifecycleService, SubmitInput};
use crate::lifecycle::types::{BalanceAdjustment, LeaveRequest, LeaveStatus};

fn category_strategy() -> impl Strategy<Value = LeaveCategory> {
    prop_oneof![
        Just(LeaveCategory::Annual),
        Just(LeaveCategory::Sick),
        Just(LeaveCategory::Personal),
        Just(LeaveCategory::Other),
    ]
}

/// A decision an admin might take, in arbitrary order.
#[derive(Debug, Clone, Copy)]
enum Step {
    Approve,
    Reject,
    Reset,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![Just(Step::Approve), Just(Step::Reject), Just(Step::Reset)]
}

fn apply(balance: &mut LeaveBalance, adjustment: Option<BalanceAdjustment>) {
    match adjustment {
        Some(BalanceAdjustment::Debit { category, days }) => {
            balance.debit(category, days).unwrap();
        }
        Some(BalanceAdjustment::Credit { category, days }) => balance.credit(category, days),
        None => {}
    }
}

fn submit(category: LeaveCategory, days: u32, balance: &LeaveBalance) -> LeaveRequest {
    let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    LifecycleService::submit(
        SubmitInput {
            owner_id: UserId::new(),
            category,
            start_date: start,
            end_date: start + Duration::days(i64::from(days) - 1),
            reason: None,
        },
        balance,
    )
    .unwrap()
}

proptest! {
    /// Over any decision sequence, the balance deficit equals the day
    /// count while approved and zero otherwise. In particular no sequence
    /// can charge the request twice.
    #[test]
    fn prop_no_double_charge(
        category in category_strategy(),
        days in 1u32..=10,
        steps in prop::collection::vec(step_strategy(), 0..12),
    ) {
        let initial = LeaveBalance::new(20, 20, 20);
        let mut balance = initial;
        let mut request = submit(category, days, &balance);

        for step in steps {
            let decision = match step {
                Step::Approve => LifecycleService::approve(&request, &balance),
                Step::Reject => LifecycleService::reject(&request, "policy"),
                Step::Reset => LifecycleService::reset(&request),
            };
            // Invalid edges leave everything untouched
            let Ok(decision) = decision else { continue };

            apply(&mut balance, decision.adjustment);
            request.status = decision.new_status;
            request.rejection_reason = decision.rejection_reason;
        }

        let mut expected = initial;
        if request.status == LeaveStatus::Approved {
            expected.debit(category, days).unwrap();
        }
        prop_assert_eq!(balance, expected);
    }

    /// Approve then reject restores the pre-approval balance exactly.
    #[test]
    fn prop_reject_reverses_approval(
        category in category_strategy(),
        days in 1u32..=10,
    ) {
        let initial = LeaveBalance::new(15, 15, 15);
        let mut balance = initial;
        let mut request = submit(category, days, &balance);

        let approval = LifecycleService::approve(&request, &balance).unwrap();
        apply(&mut balance, approval.adjustment);
        request.status = approval.new_status;

        let rejection = LifecycleService::reject(&request, "late notice").unwrap();
        apply(&mut balance, rejection.adjustment);

        prop_assert_eq!(balance, initial);
    }

    /// Approve then reset restores the pre-approval balance exactly.
    #[test]
    fn prop_reset_reverses_approval(
        category in category_strategy(),
        days in 1u32..=10,
    ) {
        let initial = LeaveBalance::new(15, 15, 15);
        let mut balance = initial;
        let mut request = submit(category, days, &balance);

        let approval = LifecycleService::approve(&request, &balance).unwrap();
        apply(&mut balance, approval.adjustment);
        request.status = approval.new_status;

        let reset = LifecycleService::reset(&request).unwrap();
        apply(&mut balance, reset.adjustment);

        prop_assert_eq!(balance, initial);
    }

    /// Untracked leave never produces a ledger adjustment.
    #[test]
    fn prop_other_category_never_adjusts(
        days in 1u32..=30,
        steps in prop::collection::vec(step_strategy(), 0..12),
    ) {
        let balance = LeaveBalance::new(0, 0, 0);
        let mut request = submit(LeaveCategory::Other, days, &balance);

        for step in steps {
            let decision = match step {
                Step::Approve => LifecycleService::approve(&request, &balance),
                Step::Reject => LifecycleService::reject(&request, "policy"),
                Step::Reset => LifecycleService::reset(&request),
            };
            let Ok(decision) = decision else { continue };

            prop_assert_eq!(decision.adjustment, None);
            request.status = decision.new_status;
            request.rejection_reason = decision.rejection_reason;
        }
    }

    /// The rejection reason is present exactly when the request is rejected.
    #[test]
    fn prop_reason_iff_rejected(
        category in category_strategy(),
        days in 1u32..=10,
        steps in prop::collection::vec(step_strategy(), 0..12),
    ) {
        let balance = LeaveBalance::new(50, 50, 50);
        let mut request = submit(category, days, &balance);

        for step in steps {
            let decision = match step {
                Step::Approve => LifecycleService::approve(&request, &balance),
                Step::Reject => LifecycleService::reject(&request, "policy"),
                Step::Reset => LifecycleService::reset(&request),
            };
            let Ok(decision) = decision else { continue };

            request.status = decision.new_status;
            request.rejection_reason = decision.rejection_reason;

            prop_assert_eq!(
                request.rejection_reason.is_some(),
                request.status == LeaveStatus::Rejected
            );
        }
    }
}
