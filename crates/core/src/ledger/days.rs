//! Calendar day counting for leave spans.

use chrono::NaiveDate;

use crate::ledger::error::LedgerError;

/// Computes the inclusive day count of a leave span.
///
/// Both endpoints count, so `day_count(d, d)` is 1. Weekends and holidays
/// are ordinary calendar days; there is no business-day logic.
///
/// # Errors
///
/// Returns `LedgerError::InvalidRange` if `end` is before `start`.
pub fn day_count(start: NaiveDate, end: NaiveDate) -> Result<u32, LedgerError> {
    let span = end.signed_duration_since(start).num_days();
    if span < 0 {
        return Err(LedgerError::InvalidRange { start, end });
    }

    // NaiveDate spans fit comfortably in u32.
    u32::try_from(span + 1).map_err(|_| LedgerError::InvalidRange { start, end })
}
