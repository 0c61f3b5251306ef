//! Administrator entity model and DTOs.

use fds_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full admin row from the `admins` table.
///
/// Contains the password hash -- never serialize this to API responses.
/// Use [`AdminResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe admin representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct AdminResponse {
    pub id: DbId,
    pub username: String,
    pub name: String,
    pub created_at: Timestamp,
}

impl From<&Admin> for AdminResponse {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username.clone(),
            name: admin.name.clone(),
            created_at: admin.created_at,
        }
    }
}

/// DTO for creating a new admin. The password is already hashed.
#[derive(Debug)]
pub struct CreateAdmin {
    pub username: String,
    pub password_hash: String,
    pub name: String,
}
