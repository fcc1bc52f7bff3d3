//! CSV export of a user's leave history.
//!
//! A point-in-time projection of the caller's requests; the listing is
//! captured once and is internally consistent even while decisions keep
//! flowing.

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

use crate::AppState;
use crate::middleware::auth::AuthUser;
use leavio_store::LeaveRecord;

/// Creates the export router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/leaves/export", get(export_csv))
}

const CSV_HEADER: &str =
    "id,category,start_date,end_date,day_count,status,reason,rejection_reason,created_at";

/// Quotes a CSV field, doubling embedded quotes.
fn csv_field(value: &str) -> String {
    if value.contains(['"', ',', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders one request as a CSV row.
fn csv_row(record: &LeaveRecord) -> String {
    let request = &record.request;
    [
        request.id.to_string(),
        request.category.to_string(),
        request.start_date.to_string(),
        request.end_date.to_string(),
        request.day_count.to_string(),
        request.status.to_string(),
        csv_field(request.reason.as_deref().unwrap_or_default()),
        csv_field(request.rejection_reason.as_deref().unwrap_or_default()),
        request.created_at.to_rfc3339(),
    ]
    .join(",")
}

/// GET /leaves/export - The caller's leave history as CSV.
async fn export_csv(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let records = state.store.leaves_for(auth.user_id());

    let mut body = String::from(CSV_HEADER);
    for record in &records {
        body.push('\n');
        body.push_str(&csv_row(record));
    }
    body.push('\n');

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"leave-history.csv\"",
            ),
        ],
        body,
    )
}
