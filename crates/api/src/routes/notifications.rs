//! Notification inbox routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, put},
};

use crate::AppState;
use crate::middleware::auth::AuthUser;
use crate::routes::store_error_response;
use leavio_shared::types::NotificationId;

/// Creates the notification router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/notifications", get(list_notifications))
        .route("/users/notifications/{id}/read", put(mark_read))
}

/// GET /users/notifications - The caller's inbox, newest first.
async fn list_notifications(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    Json(state.store.notifications_for(auth.user_id()))
}

/// PUT /users/notifications/{id}/read - Acknowledge a notification.
async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<NotificationId>,
) -> impl IntoResponse {
    match state.store.mark_notification_read(auth.user_id(), id) {
        Ok(notification) => Json(notification).into_response(),
        Err(e) => store_error_response(&e),
    }
}
