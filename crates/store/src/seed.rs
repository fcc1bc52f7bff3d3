//! Demo dataset for local development.
//!
//! Gated behind `seed.demo_data` in configuration. Requests are created
//! and decided through the ordinary store operations so the seeded state
//! satisfies every lifecycle invariant.

use chrono::{Duration, Utc};

use leavio_core::auth::hash_password;
use leavio_core::ledger::{LeaveBalance, LeaveCategory};
use leavio_core::lifecycle::DecisionAction;

use crate::{Store, StoreResult};

/// Password shared by every demo account.
const DEMO_PASSWORD: &str = "password123";

/// Default allowances for a newly registered user.
#[must_use]
pub fn default_balance() -> LeaveBalance {
    LeaveBalance::new(25, 12, 5)
}

/// Seeds the demo users and a handful of requests in various states.
///
/// Idempotent per process start; calling it on a non-empty store is a
/// no-op.
///
/// # Errors
///
/// Propagates any store error; the demo data itself always passes
/// validation.
pub fn seed_demo(store: &Store) -> StoreResult<()> {
    if store.find_user_by_email("admin@example.com").is_some() {
        return Ok(());
    }

    let hash = hash_password(DEMO_PASSWORD)
        .expect("hashing a constant demo password cannot fail");

    store.create_user("Admin", "admin@example.com", &hash, true, default_balance())?;
    let alice = store.create_user("Alice Johnson", "alice@example.com", &hash, false, default_balance())?;
    let bob = store.create_user("Bob Smith", "bob@example.com", &hash, false, default_balance())?;

    let today = Utc::now().date_naive();

    // Alice: one approved annual leave, one pending sick day
    let vacation = store.submit_leave(
        alice.id,
        LeaveCategory::Annual,
        today + Duration::days(14),
        today + Duration::days(18),
        Some("Family vacation".to_string()),
    )?;
    store.decide_leave(vacation.request.id, DecisionAction::Approve, None, None)?;

    store.submit_leave(
        alice.id,
        LeaveCategory::Sick,
        today + Duration::days(2),
        today + Duration::days(2),
        Some("Dentist appointment".to_string()),
    )?;

    // Bob: one rejected personal day
    let errand = store.submit_leave(
        bob.id,
        LeaveCategory::Personal,
        today + Duration::days(7),
        today + Duration::days(7),
        None,
    )?;
    store.decide_leave(
        errand.request.id,
        DecisionAction::Reject,
        Some("Team is at capacity that week"),
        None,
    )?;

    tracing::info!("demo data seeded");
    Ok(())
}
