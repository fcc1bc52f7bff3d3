//! User accounts and their leave balances.

use chrono::{DateTime, Utc};
use serde::Serialize;

use leavio_core::ledger::LeaveBalance;
use leavio_shared::types::UserId;

use crate::{Store, StoreError, StoreResult};

/// A user account.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    /// Unique identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email, unique across the store.
    pub email: String,
    /// Argon2id hash in PHC string format. Never serialized.
    #[serde(skip)]
    pub password_hash: String,
    /// Whether the user may decide other users' requests.
    pub is_admin: bool,
    /// Remaining leave days per tracked category.
    pub leave_balance: LeaveBalance,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
}

impl Store {
    /// Creates a user with the given balance allowances.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EmailTaken` if the email is already registered.
    pub fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        is_admin: bool,
        leave_balance: LeaveBalance,
    ) -> StoreResult<UserRecord> {
        let email = email.trim().to_lowercase();
        let user = UserRecord {
            id: UserId::new(),
            name: name.trim().to_string(),
            email: email.clone(),
            password_hash: password_hash.to_string(),
            is_admin,
            leave_balance,
            created_at: Utc::now(),
        };

        // The email index entry doubles as the uniqueness claim; whoever
        // inserts it first owns the address.
        match self.emails.entry(email) {
            dashmap::Entry::Occupied(e) => return Err(StoreError::EmailTaken(e.key().clone())),
            dashmap::Entry::Vacant(e) => {
                e.insert(user.id);
            }
        }
        self.users.insert(user.id, user.clone());

        tracing::debug!(user_id = %user.id, "user created");
        Ok(user)
    }

    /// Looks up a user by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UserNotFound` if no such user exists.
    pub fn get_user(&self, id: UserId) -> StoreResult<UserRecord> {
        self.users
            .get(&id)
            .map(|u| u.clone())
            .ok_or(StoreError::UserNotFound(id))
    }

    /// Looks up a user by email (case-insensitive).
    #[must_use]
    pub fn find_user_by_email(&self, email: &str) -> Option<UserRecord> {
        let id = *self.emails.get(&email.trim().to_lowercase())?;
        self.users.get(&id).map(|u| u.clone())
    }

    /// Returns the user's current leave balance.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UserNotFound` if no such user exists.
    pub fn balance_of(&self, id: UserId) -> StoreResult<LeaveBalance> {
        self.get_user(id).map(|u| u.leave_balance)
    }
}
