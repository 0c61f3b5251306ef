//! Contribution entity model and DTOs.

use fds_core::ledger::LedgerEntry;
use fds_core::period::Month;
use fds_core::types::{Cents, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `contributions` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Contribution {
    pub id: DbId,
    pub member_id: DbId,
    #[sqlx(try_from = "String")]
    pub month: Month,
    pub year: i32,
    pub amount_cents: Cents,
    pub payment_date: Timestamp,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Contribution {
    pub fn to_ledger_entry(&self) -> LedgerEntry {
        LedgerEntry {
            contribution_id: self.id,
            year: self.year,
            month: self.month,
            amount_cents: self.amount_cents,
            payment_date: self.payment_date,
            description: self.description.clone(),
        }
    }
}

/// DTO for inserting a contribution. Values are validated by the caller.
#[derive(Debug, Clone)]
pub struct CreateContribution {
    pub member_id: DbId,
    pub month: Month,
    pub year: i32,
    pub amount_cents: Cents,
    pub payment_date: Timestamp,
    pub description: Option<String>,
}

/// DTO for updating a contribution. Absent fields are left unchanged;
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct UpdateContribution {
    pub month: Option<Month>,
    pub year: Option<i32>,
    pub amount_cents: Option<Cents>,
    pub payment_date: Option<Timestamp>,
    pub description: Option<Option<String>>,
}

/// Optional filters for listing contributions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContributionFilter {
    pub member_id: Option<DbId>,
    pub year: Option<i32>,
    pub month: Option<Month>,
}
