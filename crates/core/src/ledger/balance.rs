//! Leave categories and per-user balance accounting.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ledger::error::LedgerError;

/// Leave category of a request.
///
/// Only `annual`, `sick`, and `personal` are tracked against a balance.
/// `other` is unlimited and unaccounted by policy; no ledger entry exists
/// for it and no transition ever mutates a balance on its behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveCategory {
    /// Annual paid leave.
    Annual,
    /// Sick leave.
    Sick,
    /// Personal (exceptional) leave.
    Personal,
    /// Anything else; not balance-checked.
    Other,
}

impl LeaveCategory {
    /// Returns the string representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Sick => "sick",
            Self::Personal => "personal",
            Self::Other => "other",
        }
    }

    /// Parses a category from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "annual" => Some(Self::Annual),
            "sick" => Some(Self::Sick),
            "personal" => Some(Self::Personal),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Returns true if this category draws from a balance.
    #[must_use]
    pub const fn is_tracked(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

impl fmt::Display for LeaveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Remaining whole days per tracked category for one user.
///
/// Entries never go negative; every mutation routes through [`debit`] or
/// [`credit`], and a debit that would underflow is refused.
///
/// [`debit`]: LeaveBalance::debit
/// [`credit`]: LeaveBalance::credit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// Remaining annual leave days.
    pub annual: u32,
    /// Remaining sick leave days.
    pub sick: u32,
    /// Remaining personal leave days.
    pub personal: u32,
}

impl LeaveBalance {
    /// Creates a balance with the given per-category allowances.
    #[must_use]
    pub const fn new(annual: u32, sick: u32, personal: u32) -> Self {
        Self {
            annual,
            sick,
            personal,
        }
    }

    /// Returns the remaining days for a category, or `None` for untracked
    /// categories.
    #[must_use]
    pub const fn remaining(&self, category: LeaveCategory) -> Option<u32> {
        match category {
            LeaveCategory::Annual => Some(self.annual),
            LeaveCategory::Sick => Some(self.sick),
            LeaveCategory::Personal => Some(self.personal),
            LeaveCategory::Other => None,
        }
    }

    /// Returns true if `days` can be drawn from `category`.
    ///
    /// Untracked categories are always sufficient.
    #[must_use]
    pub fn has_sufficient(&self, category: LeaveCategory, days: u32) -> bool {
        match self.remaining(category) {
            Some(available) => days <= available,
            None => true,
        }
    }

    /// Debits `days` from `category`. No-op for untracked categories.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::BalanceUnderflow` if the debit would drive
    /// the entry negative; the balance is left unchanged.
    pub fn debit(&mut self, category: LeaveCategory, days: u32) -> Result<(), LedgerError> {
        let Some(entry) = self.entry_mut(category) else {
            return Ok(());
        };

        match entry.checked_sub(days) {
            Some(next) => {
                *entry = next;
                Ok(())
            }
            None => Err(LedgerError::BalanceUnderflow {
                category,
                debit: days,
                available: *entry,
            }),
        }
    }

    /// Credits `days` back to `category`. No-op for untracked categories.
    pub fn credit(&mut self, category: LeaveCategory, days: u32) {
        if let Some(entry) = self.entry_mut(category) {
            *entry = entry.saturating_add(days);
        }
    }

    fn entry_mut(&mut self, category: LeaveCategory) -> Option<&mut u32> {
        match category {
            LeaveCategory::Annual => Some(&mut self.annual),
            LeaveCategory::Sick => Some(&mut self.sick),
            LeaveCategory::Personal => Some(&mut self.personal),
            LeaveCategory::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("annual", LeaveCategory::Annual)]
    #[case("SICK", LeaveCategory::Sick)]
    #[case("Personal", LeaveCategory::Personal)]
    #[case("other", LeaveCategory::Other)]
    fn test_category_parse(#[case] input: &str, #[case] expected: LeaveCategory) {
        assert_eq!(LeaveCategory::parse(input), Some(expected));
    }

    #[test]
    fn test_category_parse_rejects_unknown() {
        assert_eq!(LeaveCategory::parse("sabbatical"), None);
    }

    #[test]
    fn test_only_other_is_untracked() {
        assert!(LeaveCategory::Annual.is_tracked());
        assert!(LeaveCategory::Sick.is_tracked());
        assert!(LeaveCategory::Personal.is_tracked());
        assert!(!LeaveCategory::Other.is_tracked());
    }

    #[test]
    fn test_remaining_per_category() {
        let balance = LeaveBalance::new(25, 12, 5);
        assert_eq!(balance.remaining(LeaveCategory::Annual), Some(25));
        assert_eq!(balance.remaining(LeaveCategory::Sick), Some(12));
        assert_eq!(balance.remaining(LeaveCategory::Personal), Some(5));
        assert_eq!(balance.remaining(LeaveCategory::Other), None);
    }

    #[test]
    fn test_sufficiency_check() {
        let balance = LeaveBalance::new(10, 0, 2);
        assert!(balance.has_sufficient(LeaveCategory::Annual, 10));
        assert!(!balance.has_sufficient(LeaveCategory::Annual, 11));
        assert!(!balance.has_sufficient(LeaveCategory::Sick, 1));
        // Untracked categories are always sufficient
        assert!(balance.has_sufficient(LeaveCategory::Other, 1000));
    }

    #[test]
    fn test_debit_and_credit() {
        let mut balance = LeaveBalance::new(10, 5, 3);
        balance.debit(LeaveCategory::Annual, 4).unwrap();
        assert_eq!(balance.annual, 6);
        balance.credit(LeaveCategory::Annual, 4);
        assert_eq!(balance.annual, 10);
    }

    #[test]
    fn test_debit_underflow_leaves_balance_unchanged() {
        let mut balance = LeaveBalance::new(3, 5, 3);
        let result = balance.debit(LeaveCategory::Annual, 4);
        assert!(matches!(
            result,
            Err(LedgerError::BalanceUnderflow {
                category: LeaveCategory::Annual,
                debit: 4,
                available: 3,
            })
        ));
        assert_eq!(balance.annual, 3);
    }

    #[test]
    fn test_other_never_mutates_balance() {
        let mut balance = LeaveBalance::new(10, 5, 3);
        balance.debit(LeaveCategory::Other, 99).unwrap();
        balance.credit(LeaveCategory::Other, 99);
        assert_eq!(balance, LeaveBalance::new(10, 5, 3));
    }
}
