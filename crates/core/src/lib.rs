//! Core business logic for Leavio.
//!
//! This crate contains the pure domain logic of the leave tracker:
//!
//! - `ledger` - leave categories, day counting, and balance accounting
//! - `lifecycle` - the leave request state machine and its side effects
//! - `auth` - password hashing
//!
//! Nothing in this crate performs I/O; every operation is a deterministic
//! function of its inputs. The store crate applies the decisions produced
//! here atomically.

pub mod auth;
pub mod ledger;
pub mod lifecycle;
