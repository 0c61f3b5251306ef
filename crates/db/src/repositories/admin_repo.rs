//! Repository for the `admins` table.

use chrono::Utc;
use fds_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::admin::{Admin, CreateAdmin};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, name, created_at, updated_at";

/// Provides CRUD operations for administrators.
pub struct AdminRepo;

impl AdminRepo {
    /// Insert a new admin, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateAdmin) -> Result<Admin, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO admins (username, password_hash, name, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find an admin by internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE id = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an admin by username (case-sensitive).
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE username = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Replace an admin's password hash. Returns `true` if the admin exists.
    pub async fn update_password(
        pool: &SqlitePool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE admins SET password_hash = $2, updated_at = $3 WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .bind(Utc::now())
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
