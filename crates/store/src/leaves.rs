//! Leave request storage and decision application.
//!
//! The lifecycle engine computes what a transition means; this module
//! makes it happen atomically. While a decision is being applied the
//! request's map guard and the owner's user guard are both held, so no
//! other decision can interleave with the status flip or the balance
//! delta. Guards are always taken request first, then user.

use serde::Serialize;

use leavio_core::ledger::LeaveCategory;
use leavio_core::lifecycle::{
    BalanceAdjustment, DecisionAction, LeaveRequest, LifecycleError, LifecycleService, SubmitInput,
};
use leavio_shared::types::{LeaveRequestId, UserId};

use crate::{Store, StoreError, StoreResult};

/// A stored request with its optimistic-concurrency version.
#[derive(Debug, Clone)]
pub(crate) struct VersionedRequest {
    pub(crate) request: LeaveRequest,
    pub(crate) version: u64,
}

/// A leave request together with the version a decision must cite to
/// pass the optimistic check.
#[derive(Debug, Clone, Serialize)]
pub struct LeaveRecord {
    /// The request itself.
    #[serde(flatten)]
    pub request: LeaveRequest,
    /// Incremented on every applied decision.
    pub version: u64,
}

impl From<&VersionedRequest> for LeaveRecord {
    fn from(v: &VersionedRequest) -> Self {
        Self {
            request: v.request.clone(),
            version: v.version,
        }
    }
}

impl Store {
    /// Submits a new leave request for `owner_id`.
    ///
    /// Validates the range and, for tracked categories, that the owner's
    /// current balance covers the span. Nothing is deducted; a failed
    /// submission stores nothing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UserNotFound` for an unknown owner, or the
    /// underlying `LifecycleError` when validation refuses the request.
    pub fn submit_leave(
        &self,
        owner_id: UserId,
        category: LeaveCategory,
        start_date: chrono::NaiveDate,
        end_date: chrono::NaiveDate,
        reason: Option<String>,
    ) -> StoreResult<LeaveRecord> {
        let balance = {
            let user = self
                .users
                .get(&owner_id)
                .ok_or(StoreError::UserNotFound(owner_id))?;
            user.leave_balance
        };

        let request = LifecycleService::submit(
            SubmitInput {
                owner_id,
                category,
                start_date,
                end_date,
                reason,
            },
            &balance,
        )?;

        let record = VersionedRequest {
            request,
            version: 0,
        };
        let snapshot = LeaveRecord::from(&record);
        self.requests.insert(record.request.id, record);

        tracing::debug!(
            request_id = %snapshot.request.id,
            user_id = %owner_id,
            category = %category,
            days = snapshot.request.day_count,
            "leave request submitted"
        );
        Ok(snapshot)
    }

    /// Applies an admin decision to a request.
    ///
    /// `rejection_reason` is consulted only for `Reject`. When
    /// `expected_version` is given and does not match the stored version
    /// the decision fails with `Conflict` and the caller is expected to
    /// re-read and retry.
    ///
    /// Any failure leaves the request, its version, and the owner's
    /// balance untouched.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Conflict`, `InvalidTransition`, `MissingReason`,
    /// `InsufficientBalance`, or `BalanceUnderflow`, all via
    /// `StoreError::Lifecycle`.
    pub fn decide_leave(
        &self,
        id: LeaveRequestId,
        action: DecisionAction,
        rejection_reason: Option<&str>,
        expected_version: Option<u64>,
    ) -> StoreResult<LeaveRecord> {
        let mut entry = self
            .requests
            .get_mut(&id)
            .ok_or(LifecycleError::NotFound(id))
            .map_err(StoreError::from)?;

        if let Some(expected) = expected_version
            && expected != entry.version
        {
            return Err(LifecycleError::Conflict {
                expected,
                actual: entry.version,
            }
            .into());
        }

        let owner_id = entry.request.owner_id;
        let mut owner = self
            .users
            .get_mut(&owner_id)
            .ok_or(StoreError::UserNotFound(owner_id))?;

        let decision = match action {
            DecisionAction::Approve => {
                LifecycleService::approve(&entry.request, &owner.leave_balance)
            }
            DecisionAction::Reject => {
                LifecycleService::reject(&entry.request, rejection_reason.unwrap_or_default())
            }
            DecisionAction::Reset => LifecycleService::reset(&entry.request),
        }
        .map_err(StoreError::from)?;

        // The balance delta is the only mutation that can still fail; it
        // happens before the request is touched, and a refused debit
        // changes nothing.
        match decision.adjustment {
            Some(BalanceAdjustment::Debit { category, days }) => {
                owner
                    .leave_balance
                    .debit(category, days)
                    .map_err(LifecycleError::from)
                    .map_err(StoreError::from)?;
            }
            Some(BalanceAdjustment::Credit { category, days }) => {
                owner.leave_balance.credit(category, days);
            }
            None => {}
        }

        entry.request.status = decision.new_status;
        entry.request.rejection_reason = decision.rejection_reason;
        entry.version += 1;

        let snapshot = LeaveRecord::from(&*entry);
        drop(owner);
        drop(entry);

        tracing::info!(
            request_id = %id,
            user_id = %owner_id,
            status = %snapshot.request.status,
            "leave decision applied"
        );

        // Fire-and-forget relative to the transition; the decision is
        // already durable by the time the notification lands.
        if let Some(event) = decision.notification {
            self.push_notification(event);
        }

        Ok(snapshot)
    }

    /// Looks up a single request.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::NotFound` via `StoreError` if absent.
    pub fn get_leave(&self, id: LeaveRequestId) -> StoreResult<LeaveRecord> {
        self.requests
            .get(&id)
            .map(|r| LeaveRecord::from(&*r))
            .ok_or_else(|| LifecycleError::NotFound(id).into())
    }

    /// All requests belonging to `owner_id`, newest first.
    #[must_use]
    pub fn leaves_for(&self, owner_id: UserId) -> Vec<LeaveRecord> {
        let mut records: Vec<LeaveRecord> = self
            .requests
            .iter()
            .filter(|r| r.request.owner_id == owner_id)
            .map(|r| LeaveRecord::from(&*r))
            .collect();
        records.sort_by(|a, b| b.request.created_at.cmp(&a.request.created_at));
        records
    }

    /// Every request in the store, newest first.
    #[must_use]
    pub fn all_leaves(&self) -> Vec<LeaveRecord> {
        let mut records: Vec<LeaveRecord> =
            self.requests.iter().map(|r| LeaveRecord::from(&*r)).collect();
        records.sort_by(|a, b| b.request.created_at.cmp(&a.request.created_at));
        records
    }
}
