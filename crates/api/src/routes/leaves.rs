//! Leave request routes: submission, queries, and admin decisions.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AppState;
use crate::middleware::auth::AuthUser;
use crate::routes::{forbidden_response, store_error_response};
use leavio_core::ledger::LeaveCategory;
use leavio_core::lifecycle::DecisionAction;
use leavio_shared::types::LeaveRequestId;
use leavio_store::LeaveRecord;

/// Creates the leave request router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leaves", post(submit_leave).get(list_own))
        .route("/leaves/all", get(list_all))
        .route("/leaves/{id}", get(get_leave).put(decide_leave))
}

/// Request body for submitting a leave request.
#[derive(Debug, Deserialize)]
pub struct SubmitLeaveRequest {
    /// Leave category.
    pub category: LeaveCategory,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Optional free-text motivation.
    pub reason: Option<String>,
}

/// Request body for an admin decision.
#[derive(Debug, Deserialize)]
pub struct DecideLeaveRequest {
    /// The decision to apply.
    pub action: DecisionAction,
    /// Required when `action` is `reject`.
    pub rejection_reason: Option<String>,
    /// Optimistic-concurrency check against the stored version.
    pub expected_version: Option<u64>,
}

/// A leave request annotated with its owner's display name, for the
/// admin overview.
#[derive(Debug, Serialize)]
pub struct OwnedLeaveRecord {
    /// The stored request.
    #[serde(flatten)]
    pub record: LeaveRecord,
    /// Display name of the requester.
    pub owner_name: String,
}

/// POST /leaves - Submit a new leave request.
async fn submit_leave(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<SubmitLeaveRequest>,
) -> impl IntoResponse {
    match state.store.submit_leave(
        auth.user_id(),
        payload.category,
        payload.start_date,
        payload.end_date,
        payload.reason,
    ) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => store_error_response(&e),
    }
}

/// GET /leaves - List the caller's own requests, newest first.
async fn list_own(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    Json(state.store.leaves_for(auth.user_id()))
}

/// GET /leaves/all - List every request with owner names (admin only).
async fn list_all(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden_response();
    }

    let records: Vec<OwnedLeaveRecord> = state
        .store
        .all_leaves()
        .into_iter()
        .map(|record| {
            let owner_name = state
                .store
                .get_user(record.request.owner_id)
                .map(|u| u.name)
                .unwrap_or_default();
            OwnedLeaveRecord { record, owner_name }
        })
        .collect();

    Json(records).into_response()
}

/// GET /leaves/{id} - Fetch a single request.
///
/// Admins may read any request; everyone else only their own. A foreign
/// request is reported as not found rather than forbidden.
async fn get_leave(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<LeaveRequestId>,
) -> impl IntoResponse {
    match state.store.get_leave(id) {
        Ok(record) if auth.is_admin() || record.request.owner_id == auth.user_id() => {
            Json(record).into_response()
        }
        Ok(_) => store_error_response(
            &leavio_core::lifecycle::LifecycleError::NotFound(id).into(),
        ),
        Err(e) => store_error_response(&e),
    }
}

/// PUT /leaves/{id} - Apply an admin decision to a request.
async fn decide_leave(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<LeaveRequestId>,
    Json(payload): Json<DecideLeaveRequest>,
) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden_response();
    }

    match state.store.decide_leave(
        id,
        payload.action,
        payload.rejection_reason.as_deref(),
        payload.expected_version,
    ) {
        Ok(record) => {
            info!(
                request_id = %id,
                user_id = %auth.user_id(),
                status = %record.request.status,
                "leave decision recorded"
            );
            Json(record).into_response()
        }
        Err(e) => store_error_response(&e),
    }
}
