//! Property tests for calendar day counting.

use chrono::NaiveDate;
use proptest::prelude::*;

use crate::ledger::days::day_count;
use crate::ledger::error::LedgerError;

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    // Any day in a generous window around the epoch.
    (-20_000i64..40_000i64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .checked_add_signed(chrono::Duration::days(offset))
            .unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// For any ordered pair, the count is the day difference plus one.
    #[test]
    fn prop_count_is_span_plus_one(a in date_strategy(), b in date_strategy()) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let expected = end.signed_duration_since(start).num_days() + 1;
        prop_assert_eq!(i64::from(day_count(start, end).unwrap()), expected);
    }

    /// Every span covers at least one day.
    #[test]
    fn prop_count_is_at_least_one(a in date_strategy(), b in date_strategy()) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(day_count(start, end).unwrap() >= 1);
    }

    /// Every reversed pair fails with `InvalidRange`.
    #[test]
    fn prop_reversed_range_always_fails(a in date_strategy(), b in date_strategy()) {
        prop_assume!(a != b);
        let (start, end) = if a < b { (b, a) } else { (a, b) };
        prop_assert!(
            matches!(day_count(start, end), Err(LedgerError::InvalidRange { .. })),
            "expected InvalidRange error"
        );
    }
}
