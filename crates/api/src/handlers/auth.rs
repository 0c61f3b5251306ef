//! Handlers for the `/auth` resource (login, profile, password change).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fds_core::error::CoreError;
use fds_db::models::admin::{Admin, AdminResponse};
use fds_db::repositories::AdminRepo;
use serde::{Deserialize, Serialize};

use crate::auth::password::{check_new_password, hash_password, verify_password};
use crate::auth::token::issue_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub admin: AdminResponse,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

/// The admin row behind a still-valid token. A token can outlive its admin.
async fn current_admin(state: &AppState, auth: &AuthAdmin) -> AppResult<Admin> {
    AdminRepo::find_by_id(&state.pool, auth.admin_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Admin no longer exists".into())))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password and issue an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let admin = AdminRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(|| {
            tracing::warn!(username = %input.username, "Login attempt for unknown admin");
            invalid_credentials()
        })?;

    if !verify_password(&input.password, &admin.password_hash)? {
        tracing::warn!(admin_id = admin.id, "Login failed: wrong password");
        return Err(invalid_credentials());
    }

    let token = issue_token(admin.id, &admin.username, &state.config.token)?;

    tracing::info!(admin_id = admin.id, "Admin logged in");

    Ok(Json(LoginResponse {
        token,
        expires_in: state.config.token.ttl_secs(),
        admin: AdminResponse::from(&admin),
    }))
}

/// GET /api/v1/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthAdmin,
) -> AppResult<Json<DataResponse<AdminResponse>>> {
    let admin = current_admin(&state, &auth).await?;

    Ok(Json(DataResponse {
        data: AdminResponse::from(&admin),
    }))
}

/// POST /api/v1/auth/change-password
///
/// Verify the current password and replace it. Returns 204 No Content.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let admin = current_admin(&state, &auth).await?;

    if !verify_password(&input.current_password, &admin.password_hash)? {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    check_new_password(&input.new_password)?;

    let hash = hash_password(&input.new_password)?;
    AdminRepo::update_password(&state.pool, admin.id, &hash).await?;

    tracing::info!(admin_id = admin.id, "Admin password changed");
    Ok(StatusCode::NO_CONTENT)
}
