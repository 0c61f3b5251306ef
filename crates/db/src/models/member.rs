//! Member entity model and DTOs.

use fds_core::ledger::{LedgerEntry, MemberLedger};
use fds_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::contribution::Contribution;
use crate::models::nullable;

/// A row from the `members` table. `created_at` is the join date.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Member {
    pub id: DbId,
    pub account_number: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A member together with all of their contributions, newest payment first.
#[derive(Debug, Clone, Serialize)]
pub struct MemberWithContributions {
    #[serde(flatten)]
    pub member: Member,
    pub contributions: Vec<Contribution>,
}

impl MemberWithContributions {
    /// Snapshot this member for the aggregation layer.
    pub fn to_ledger(&self) -> MemberLedger {
        MemberLedger {
            member_id: self.member.id,
            account_number: self.member.account_number.clone(),
            name: self.member.name.clone(),
            entries: self
                .contributions
                .iter()
                .map(Contribution::to_ledger_entry)
                .collect::<Vec<LedgerEntry>>(),
        }
    }
}

/// DTO for creating a new member. The account number is assigned on insert.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMember {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: Option<String>,
}

/// DTO for updating a member.
///
/// Absent fields are left unchanged. The optional contact fields take
/// `null` to clear the stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMember {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: Option<Option<String>>,
}
