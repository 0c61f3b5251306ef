//! Admin account management commands.

use fds_api::auth::password::{check_new_password, hash_password};
use fds_db::models::admin::CreateAdmin;
use fds_db::repositories::AdminRepo;
use fds_db::DbPool;
use thiserror::Error;

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Username must not be empty")]
    EmptyUsername,

    #[error("{0}")]
    WeakPassword(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Admin already exists with username: {0}")]
    UserExists(String),

    #[error("No admin with username: {0}")]
    UserNotFound(String),
}

fn hash(password: &str) -> Result<String, AdminError> {
    check_new_password(password).map_err(|e| AdminError::WeakPassword(e.to_string()))?;
    hash_password(password).map_err(|e| AdminError::Hashing(e.to_string()))
}

/// Create a new admin account. Fails if the username is taken.
pub async fn create(
    pool: &DbPool,
    username: &str,
    password: &str,
    name: &str,
) -> Result<i64, AdminError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AdminError::EmptyUsername);
    }

    if AdminRepo::find_by_username(pool, username).await?.is_some() {
        return Err(AdminError::UserExists(username.to_owned()));
    }

    let admin = AdminRepo::create(
        pool,
        &CreateAdmin {
            username: username.to_owned(),
            password_hash: hash(password)?,
            name: name.trim().to_owned(),
        },
    )
    .await?;

    tracing::info!(admin_id = admin.id, username = %admin.username, "Admin created");
    Ok(admin.id)
}

/// Replace the password of an existing admin.
pub async fn reset_password(
    pool: &DbPool,
    username: &str,
    password: &str,
) -> Result<(), AdminError> {
    let username = username.trim();
    let admin = AdminRepo::find_by_username(pool, username)
        .await?
        .ok_or_else(|| AdminError::UserNotFound(username.to_owned()))?;

    AdminRepo::update_password(pool, admin.id, &hash(password)?).await?;

    tracing::info!(admin_id = admin.id, username = %admin.username, "Admin password reset");
    Ok(())
}
