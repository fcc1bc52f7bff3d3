//! Authentication routes for login, register, and token refresh.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use crate::routes::store_error_response;
use leavio_core::auth::{hash_password, verify_password};
use leavio_core::ledger::LeaveBalance;
use leavio_shared::auth::{LoginRequest, RefreshRequest, RegisterRequest};
use leavio_shared::types::UserId;
use leavio_store::{UserRecord, seed::default_balance};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/refresh", post(refresh))
}

/// Public view of a user account.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// User id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Admin flag.
    pub is_admin: bool,
    /// Remaining leave days per tracked category.
    pub leave_balance: LeaveBalance,
}

impl From<UserRecord> for UserInfo {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            leave_balance: user.leave_balance,
        }
    }
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// The authenticated user.
    pub user: UserInfo,
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration in seconds.
    pub expires_in: i64,
}

fn token_response(state: &AppState, user: UserRecord, status: StatusCode) -> axum::response::Response {
    let access_token = match state
        .jwt_service
        .generate_access_token(user.id.into_inner(), user.is_admin)
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error();
        }
    };
    let refresh_token = match state
        .jwt_service
        .generate_refresh_token(user.id.into_inner(), user.is_admin)
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate refresh token");
            return internal_error();
        }
    };

    (
        status,
        Json(AuthResponse {
            user: UserInfo::from(user),
            access_token,
            refresh_token,
            expires_in: state.jwt_service.access_token_expires_in(),
        }),
    )
        .into_response()
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred during authentication"
        })),
    )
        .into_response()
}

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_credentials",
            "message": "Invalid email or password"
        })),
    )
        .into_response()
}

/// POST /auth/register - Register a new user.
///
/// New accounts start with the standard allowances and no admin rights.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": "Name and email are required"
            })),
        )
            .into_response();
    }
    if payload.password.len() < 8 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": "Password must be at least 8 characters"
            })),
        )
            .into_response();
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error();
        }
    };

    let user = match state.store.create_user(
        &payload.name,
        &payload.email,
        &password_hash,
        false,
        default_balance(),
    ) {
        Ok(u) => u,
        Err(e) => return store_error_response(&e),
    };

    info!(user_id = %user.id, "User registered");
    token_response(&state, user, StatusCode::CREATED)
}

/// POST /auth/login - Authenticate user and return tokens.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let Some(user) = state.store.find_user_by_email(&payload.email) else {
        info!(email = %payload.email, "Login attempt for non-existent user");
        return invalid_credentials();
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error();
        }
    }

    info!(user_id = %user.id, "User logged in successfully");
    token_response(&state, user, StatusCode::OK)
}

/// POST /auth/refresh - Exchange a refresh token for a new token pair.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    let claims = match state.jwt_service.validate_token(&payload.refresh_token) {
        Ok(c) => c,
        Err(e) => {
            info!(error = %e, "Refresh with invalid token");
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_token",
                    "message": "Invalid or expired refresh token"
                })),
            )
                .into_response();
        }
    };

    // Re-read the user so revoked accounts and stale admin flags do not
    // survive a refresh.
    let user = match state.store.get_user(UserId::from_uuid(claims.user_id())) {
        Ok(u) => u,
        Err(e) => return store_error_response(&e),
    };

    token_response(&state, user, StatusCode::OK)
}
