//! Contribution ledger aggregation.
//!
//! Every function here is a pure computation over an in-memory snapshot of
//! members and their contributions. Reports are rebuilt from a fresh snapshot
//! on each request; nothing is cached or updated incrementally.
//!
//! "Paid" for a multi-month range means the member paid in ANY of the
//! selected months, not all of them.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::period::{Month, PeriodSelector};
use crate::types::{Cents, DbId, Timestamp};

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

/// One contribution as seen by the aggregation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub contribution_id: DbId,
    pub year: i32,
    pub month: Month,
    pub amount_cents: Cents,
    pub payment_date: Timestamp,
    pub description: Option<String>,
}

/// A member together with all of their contributions.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberLedger {
    pub member_id: DbId,
    pub account_number: String,
    pub name: String,
    pub entries: Vec<LedgerEntry>,
}

impl MemberLedger {
    /// The contribution recorded for `(year, month)`, if any.
    pub fn payment_for(&self, year: i32, month: Month) -> Option<&LedgerEntry> {
        self.entries
            .iter()
            .find(|e| e.year == year && e.month == month)
    }

    pub fn has_payment(&self, year: i32, month: Month) -> bool {
        self.payment_for(year, month).is_some()
    }
}

// ---------------------------------------------------------------------------
// Payment matrix
// ---------------------------------------------------------------------------

/// Payment status of one member for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixCell {
    pub month: Month,
    pub paid: bool,
    pub amount_cents: Option<Cents>,
    pub payment_date: Option<Timestamp>,
}

/// One member's row in the payment matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRow {
    pub member_id: DbId,
    pub account_number: String,
    pub name: String,
    /// `true` when at least one selected month is paid.
    pub paid: bool,
    pub cells: Vec<MatrixCell>,
}

/// Summary counts for a period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaymentStats {
    pub paid_members: usize,
    pub unpaid_members: usize,
    pub total_amount_cents: Cents,
}

/// Member x month payment matrix for a [`PeriodSelector`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentMatrix {
    pub period: PeriodSelector,
    pub months: Vec<Month>,
    pub rows: Vec<MatrixRow>,
    pub stats: PaymentStats,
}

/// Build the payment matrix for `period`. Rows keep the order of `members`.
pub fn payment_matrix(members: &[MemberLedger], period: &PeriodSelector) -> PaymentMatrix {
    let months = period.months();
    let mut stats = PaymentStats::default();

    let rows: Vec<MatrixRow> = members
        .iter()
        .map(|member| {
            let cells: Vec<MatrixCell> = months
                .iter()
                .map(|&month| match member.payment_for(period.year, month) {
                    Some(entry) => MatrixCell {
                        month,
                        paid: true,
                        amount_cents: Some(entry.amount_cents),
                        payment_date: Some(entry.payment_date),
                    },
                    None => MatrixCell {
                        month,
                        paid: false,
                        amount_cents: None,
                        payment_date: None,
                    },
                })
                .collect();

            let paid = cells.iter().any(|c| c.paid);
            if paid {
                stats.paid_members += 1;
            } else {
                stats.unpaid_members += 1;
            }
            stats.total_amount_cents += cells.iter().filter_map(|c| c.amount_cents).sum::<Cents>();

            MatrixRow {
                member_id: member.member_id,
                account_number: member.account_number.clone(),
                name: member.name.clone(),
                paid,
                cells,
            }
        })
        .collect();

    PaymentMatrix {
        period: *period,
        months,
        rows,
        stats,
    }
}

/// Summary counts only; equivalent to `payment_matrix(..).stats`.
pub fn payment_stats(members: &[MemberLedger], period: &PeriodSelector) -> PaymentStats {
    payment_matrix(members, period).stats
}

// ---------------------------------------------------------------------------
// Monthly status
// ---------------------------------------------------------------------------

/// Paid/unpaid counts for a single month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyStatus {
    pub year: i32,
    pub month: Month,
    pub paid_count: usize,
    pub unpaid_count: usize,
    pub total_amount_cents: Cents,
}

/// Per-month paid/unpaid counts for every month of `year`, December first.
pub fn monthly_status(members: &[MemberLedger], year: i32) -> Vec<MonthlyStatus> {
    Month::all()
        .rev()
        .map(|month| {
            let payments: Vec<&LedgerEntry> = members
                .iter()
                .filter_map(|m| m.payment_for(year, month))
                .collect();
            MonthlyStatus {
                year,
                month,
                paid_count: payments.len(),
                unpaid_count: members.len() - payments.len(),
                total_amount_cents: payments.iter().map(|e| e.amount_cents).sum(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Per-member totals
// ---------------------------------------------------------------------------

/// Totals shown alongside a member and on their statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberTotals {
    pub total_cents: Cents,
    pub current_year_cents: Cents,
    pub contribution_count: usize,
    pub latest_payment_date: Option<Timestamp>,
}

pub fn member_totals(member: &MemberLedger, current_year: i32) -> MemberTotals {
    MemberTotals {
        total_cents: member.entries.iter().map(|e| e.amount_cents).sum(),
        current_year_cents: member
            .entries
            .iter()
            .filter(|e| e.year == current_year)
            .map(|e| e.amount_cents)
            .sum(),
        contribution_count: member.entries.len(),
        latest_payment_date: member.entries.iter().map(|e| e.payment_date).max(),
    }
}

/// Sum of every contribution in the snapshot.
pub fn collection_total(members: &[MemberLedger]) -> Cents {
    members
        .iter()
        .flat_map(|m| m.entries.iter())
        .map(|e| e.amount_cents)
        .sum()
}

/// Distinct years with at least one contribution, newest first.
pub fn available_years(member: &MemberLedger) -> Vec<i32> {
    let years: BTreeSet<i32> = member.entries.iter().map(|e| e.year).collect();
    years.into_iter().rev().collect()
}

// ---------------------------------------------------------------------------
// Recent activity
// ---------------------------------------------------------------------------

/// A contribution annotated with its member, for activity feeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentContribution {
    pub contribution_id: DbId,
    pub member_id: DbId,
    pub account_number: String,
    pub member_name: String,
    pub year: i32,
    pub month: Month,
    pub amount_cents: Cents,
    pub payment_date: Timestamp,
}

/// The `limit` most recent payments across all members.
///
/// Ordered by payment date descending; ties go to the newer contribution id.
pub fn recent_contributions(members: &[MemberLedger], limit: usize) -> Vec<RecentContribution> {
    let mut all: Vec<RecentContribution> = members
        .iter()
        .flat_map(|m| {
            m.entries.iter().map(move |e| RecentContribution {
                contribution_id: e.contribution_id,
                member_id: m.member_id,
                account_number: m.account_number.clone(),
                member_name: m.name.clone(),
                year: e.year,
                month: e.month,
                amount_cents: e.amount_cents,
                payment_date: e.payment_date,
            })
        })
        .collect();

    all.sort_by(|a, b| {
        b.payment_date
            .cmp(&a.payment_date)
            .then(b.contribution_id.cmp(&a.contribution_id))
    });
    all.truncate(limit);
    all
}
