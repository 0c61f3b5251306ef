//! Repository for the `contributions` table.

use chrono::Utc;
use fds_core::period::Month;
use fds_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::contribution::{
    Contribution, ContributionFilter, CreateContribution, UpdateContribution,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, member_id, month, year, amount_cents, payment_date, description, \
                       created_at, updated_at";

/// Provides CRUD operations for contributions.
pub struct ContributionRepo;

impl ContributionRepo {
    /// Insert a new contribution, returning the created row.
    ///
    /// A second contribution for the same member and period fails with a
    /// unique violation on `uq_contributions_member_period`.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateContribution,
    ) -> Result<Contribution, sqlx::Error> {
        let query = format!(
            "INSERT INTO contributions
                (member_id, month, year, amount_cents, payment_date, description,
                 created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contribution>(&query)
            .bind(input.member_id)
            .bind(input.month.to_string())
            .bind(input.year)
            .bind(input.amount_cents)
            .bind(input.payment_date)
            .bind(&input.description)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a contribution by its ID.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Contribution>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contributions WHERE id = $1");
        sqlx::query_as::<_, Contribution>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the contribution a member made for a given month and year.
    pub async fn find_for_period(
        pool: &SqlitePool,
        member_id: DbId,
        month: Month,
        year: i32,
    ) -> Result<Option<Contribution>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contributions
             WHERE member_id = $1 AND month = $2 AND year = $3"
        );
        sqlx::query_as::<_, Contribution>(&query)
            .bind(member_id)
            .bind(month.to_string())
            .bind(year)
            .fetch_optional(pool)
            .await
    }

    /// List a member's contributions, newest payment first.
    pub async fn list_for_member(
        pool: &SqlitePool,
        member_id: DbId,
    ) -> Result<Vec<Contribution>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contributions
             WHERE member_id = $1
             ORDER BY payment_date DESC, id DESC"
        );
        sqlx::query_as::<_, Contribution>(&query)
            .bind(member_id)
            .fetch_all(pool)
            .await
    }

    /// List contributions matching `filter`, newest payment first.
    pub async fn list(
        pool: &SqlitePool,
        filter: &ContributionFilter,
    ) -> Result<Vec<Contribution>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contributions
             WHERE ($1 IS NULL OR member_id = $1)
               AND ($2 IS NULL OR year = $2)
               AND ($3 IS NULL OR month = $3)
             ORDER BY payment_date DESC, id DESC"
        );
        sqlx::query_as::<_, Contribution>(&query)
            .bind(filter.member_id)
            .bind(filter.year)
            .bind(filter.month.map(|m| m.to_string()))
            .fetch_all(pool)
            .await
    }

    /// Every contribution, newest payment first.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Contribution>, sqlx::Error> {
        Self::list(pool, &ContributionFilter::default()).await
    }

    /// Update a contribution by ID, returning the updated row.
    ///
    /// Moving a contribution onto a period the member already paid fails with
    /// a unique violation. `description: Some(None)` clears the description.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateContribution,
    ) -> Result<Option<Contribution>, sqlx::Error> {
        let query = format!(
            "UPDATE contributions SET
                month = COALESCE($2, month),
                year = COALESCE($3, year),
                amount_cents = COALESCE($4, amount_cents),
                payment_date = COALESCE($5, payment_date),
                description = CASE WHEN $6 THEN $7 ELSE description END,
                updated_at = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contribution>(&query)
            .bind(id)
            .bind(input.month.map(|m| m.to_string()))
            .bind(input.year)
            .bind(input.amount_cents)
            .bind(input.payment_date)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|v| v.as_deref()))
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete a contribution by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contributions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
