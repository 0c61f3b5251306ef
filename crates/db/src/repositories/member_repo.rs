//! Repository for the `members` table.
//!
//! Account numbers are issued inside the insert transaction: the
//! `account_sequence` row is touched first so SQLite takes its write lock
//! before the existing numbers are read, serialising concurrent creates.

use std::collections::HashMap;

use chrono::Utc;
use fds_core::account::next_account_number;
use fds_core::ledger::MemberLedger;
use fds_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::contribution::Contribution;
use crate::models::member::{CreateMember, Member, MemberWithContributions, UpdateMember};
use crate::repositories::ContributionRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, account_number, name, phone, email, address, created_at, updated_at";

/// Provides CRUD operations for members.
pub struct MemberRepo;

impl MemberRepo {
    /// Insert a new member with the next free account number.
    ///
    /// Returns `Ok(None)` when the four-digit number space is exhausted.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateMember,
    ) -> Result<Option<Member>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let high_water: i64 = sqlx::query_scalar(
            "UPDATE account_sequence SET last_value = last_value WHERE id = 1
             RETURNING last_value",
        )
        .fetch_one(&mut *tx)
        .await?;

        let existing: Vec<String> = sqlx::query_scalar("SELECT account_number FROM members")
            .fetch_all(&mut *tx)
            .await?;

        let high_water = u32::try_from(high_water).unwrap_or(0);
        let Some(account_number) =
            next_account_number(high_water, existing.iter().map(String::as_str))
        else {
            return Ok(None);
        };

        sqlx::query("UPDATE account_sequence SET last_value = CAST($1 AS INTEGER) WHERE id = 1")
            .bind(&account_number)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO members
                (account_number, name, phone, email, address, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {COLUMNS}"
        );
        let member = sqlx::query_as::<_, Member>(&query)
            .bind(&account_number)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(member))
    }

    /// The account number the next [`MemberRepo::create`] would issue.
    pub async fn peek_next_account_number(
        pool: &SqlitePool,
    ) -> Result<Option<String>, sqlx::Error> {
        let high_water: i64 =
            sqlx::query_scalar("SELECT last_value FROM account_sequence WHERE id = 1")
                .fetch_one(pool)
                .await?;
        let existing: Vec<String> = sqlx::query_scalar("SELECT account_number FROM members")
            .fetch_all(pool)
            .await?;

        Ok(next_account_number(
            u32::try_from(high_water).unwrap_or(0),
            existing.iter().map(String::as_str),
        ))
    }

    /// Find a member by internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE id = $1");
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a member by account number.
    pub async fn find_by_account_number(
        pool: &SqlitePool,
        account_number: &str,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE account_number = $1");
        sqlx::query_as::<_, Member>(&query)
            .bind(account_number)
            .fetch_optional(pool)
            .await
    }

    /// List all members, newest first.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Member>(&query).fetch_all(pool).await
    }

    /// Members whose name, account number or phone contains `term`
    /// (ASCII case-insensitive), newest first.
    pub async fn search(pool: &SqlitePool, term: &str) -> Result<Vec<Member>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(term.trim()));
        let query = format!(
            "SELECT {COLUMNS} FROM members
             WHERE name LIKE $1 ESCAPE '\\'
                OR account_number LIKE $1 ESCAPE '\\'
                OR phone LIKE $1 ESCAPE '\\'
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// Update a member by ID, returning the updated row.
    ///
    /// `None` keeps a column; `Some(None)` clears a nullable one.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateMember,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!(
            "UPDATE members SET
                name = COALESCE($2, name),
                phone = CASE WHEN $3 THEN $4 ELSE phone END,
                email = CASE WHEN $5 THEN $6 ELSE email END,
                address = CASE WHEN $7 THEN $8 ELSE address END,
                updated_at = $9
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.phone.is_some())
            .bind(input.phone.as_ref().and_then(|v| v.as_deref()))
            .bind(input.email.is_some())
            .bind(input.email.as_ref().and_then(|v| v.as_deref()))
            .bind(input.address.is_some())
            .bind(input.address.as_ref().and_then(|v| v.as_deref()))
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete a member by ID. Contributions are removed by `ON DELETE CASCADE`.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Members with contributions
    // -----------------------------------------------------------------------

    /// Find a member by ID together with their contributions.
    pub async fn find_with_contributions(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<MemberWithContributions>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(member) => {
                let contributions = ContributionRepo::list_for_member(pool, member.id).await?;
                Ok(Some(MemberWithContributions {
                    member,
                    contributions,
                }))
            }
            None => Ok(None),
        }
    }

    /// Find a member by account number together with their contributions.
    pub async fn find_with_contributions_by_account(
        pool: &SqlitePool,
        account_number: &str,
    ) -> Result<Option<MemberWithContributions>, sqlx::Error> {
        match Self::find_by_account_number(pool, account_number).await? {
            Some(member) => {
                let contributions = ContributionRepo::list_for_member(pool, member.id).await?;
                Ok(Some(MemberWithContributions {
                    member,
                    contributions,
                }))
            }
            None => Ok(None),
        }
    }

    /// All members (optionally filtered by `search`) with nested
    /// contributions, newest member first.
    pub async fn list_with_contributions(
        pool: &SqlitePool,
        search: Option<&str>,
    ) -> Result<Vec<MemberWithContributions>, sqlx::Error> {
        let members = match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => Self::search(pool, term).await?,
            None => Self::list(pool).await?,
        };
        let contributions = ContributionRepo::list_all(pool).await?;
        Ok(attach_contributions(members, contributions))
    }

    /// Snapshot of every member and contribution for report aggregation,
    /// ordered by account number.
    pub async fn ledger_snapshot(pool: &SqlitePool) -> Result<Vec<MemberLedger>, sqlx::Error> {
        let mut members = Self::list_with_contributions(pool, None).await?;
        members.sort_by(|a, b| a.member.account_number.cmp(&b.member.account_number));
        Ok(members.iter().map(MemberWithContributions::to_ledger).collect())
    }
}

/// Group `contributions` under their members, keeping both orders intact.
fn attach_contributions(
    members: Vec<Member>,
    contributions: Vec<Contribution>,
) -> Vec<MemberWithContributions> {
    let mut by_member: HashMap<DbId, Vec<Contribution>> = HashMap::new();
    for contribution in contributions {
        by_member
            .entry(contribution.member_id)
            .or_default()
            .push(contribution);
    }

    members
        .into_iter()
        .map(|member| MemberWithContributions {
            contributions: by_member.remove(&member.id).unwrap_or_default(),
            member,
        })
        .collect()
}

/// Escape `%`, `_` and `\` for a `LIKE ... ESCAPE '\'` pattern.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_a\\b"), "50\\%\\_a\\\\b");
        assert_eq!(escape_like("Karim"), "Karim");
    }
}
