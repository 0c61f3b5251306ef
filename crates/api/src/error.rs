//! HTTP error mapping.
//!
//! Every failure leaves the API as `{"error": <message>, "code": <CODE>}`.
//! Messages for 5xx responses are replaced with a generic one; the detail
//! goes to the log instead.

use argon2::password_hash;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fds_core::error::CoreError;
use serde::Serialize;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed input that is not a domain validation failure, such as an
    /// out-of-range query parameter.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Password hashing error: {0}")]
    Password(#[from] password_hash::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl AppError {
    /// Status, machine-readable code and client-facing message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(err) => core_parts(err),
            AppError::Database(err) => database_parts(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Password(_) | AppError::Token(_) => internal(),
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

fn core_parts(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::NotFoundBy { entity, key } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} '{key}' not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Internal(_) => internal(),
    }
}

/// Constraint violations that slip past handler checks still get a
/// meaningful status: unique → 409, foreign key → 400.
fn database_parts(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db) if db.is_unique_violation() => (
            StatusCode::CONFLICT,
            "CONFLICT",
            "Duplicate value violates a unique constraint".to_string(),
        ),
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => (
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            "Referenced record does not exist".to_string(),
        ),
        _ => internal(),
    }
}

/// Whether `err` is a unique-constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.parts();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(%status, code, "Request rejected");
        }

        (status, Json(ErrorBody { error, code })).into_response()
    }
}
