//! Member account statements.
//!
//! A statement is a read-only view over one member's contributions: a header,
//! running totals, and one row per contribution labelled in the requested
//! language.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::ledger::{member_totals, MemberLedger, MemberTotals};
use crate::locale::{format_taka, month_name, Language};
use crate::period::Month;
use crate::types::{Cents, DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementRow {
    pub contribution_id: DbId,
    /// Localised label such as `"March 2024"`.
    pub period_label: String,
    pub month: Month,
    pub year: i32,
    pub amount_cents: Cents,
    pub amount_display: String,
    pub payment_date: Timestamp,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub member_id: DbId,
    pub account_number: String,
    pub name: String,
    pub language: &'static str,
    pub statement_date: NaiveDate,
    pub totals: MemberTotals,
    pub total_display: String,
    pub rows: Vec<StatementRow>,
}

/// Build the statement for `member` as of `today`.
///
/// Rows are ordered by payment date, newest first.
pub fn build_statement(member: &MemberLedger, today: NaiveDate, language: Language) -> Statement {
    let code = match language {
        Language::English => "en",
        Language::Bengali => "bn",
    };

    let mut entries: Vec<_> = member.entries.iter().collect();
    entries.sort_by(|a, b| {
        b.payment_date
            .cmp(&a.payment_date)
            .then(b.contribution_id.cmp(&a.contribution_id))
    });

    let rows = entries
        .into_iter()
        .map(|e| StatementRow {
            contribution_id: e.contribution_id,
            period_label: format!("{} {}", month_name(e.month.number(), code), e.year),
            month: e.month,
            year: e.year,
            amount_cents: e.amount_cents,
            amount_display: format_taka(e.amount_cents),
            payment_date: e.payment_date,
            description: e.description.clone(),
        })
        .collect();

    let totals = member_totals(member, today.year());

    Statement {
        member_id: member.member_id,
        account_number: member.account_number.clone(),
        name: member.name.clone(),
        language: code,
        statement_date: today,
        total_display: format_taka(totals.total_cents),
        totals,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::tests::{entry, member};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn rows_are_newest_first_with_english_labels() {
        let m = member(
            1,
            "0007",
            vec![entry(1, 2024, 1, 50_000), entry(2, 2024, 3, 50_000)],
        );

        let statement = build_statement(&m, today(), Language::English);

        assert_eq!(statement.account_number, "0007");
        assert_eq!(statement.rows.len(), 2);
        assert_eq!(statement.rows[0].period_label, "March 2024");
        assert_eq!(statement.rows[1].period_label, "January 2024");
        assert_eq!(statement.totals.total_cents, 100_000);
        assert_eq!(statement.total_display, "৳1000.00");
    }

    #[test]
    fn bengali_labels() {
        let m = member(1, "0001", vec![entry(1, 2024, 5, 10_000)]);

        let statement = build_statement(&m, today(), Language::Bengali);

        assert_eq!(statement.language, "bn");
        assert_eq!(statement.rows[0].period_label, "মে 2024");
    }

    #[test]
    fn current_year_total_uses_statement_date() {
        let m = member(
            1,
            "0001",
            vec![entry(1, 2023, 12, 10_000), entry(2, 2024, 1, 20_000)],
        );

        let statement = build_statement(&m, today(), Language::English);

        assert_eq!(statement.totals.current_year_cents, 20_000);
        assert_eq!(statement.totals.contribution_count, 2);
    }

    #[test]
    fn empty_statement() {
        let statement = build_statement(&member(1, "0001", vec![]), today(), Language::English);
        assert!(statement.rows.is_empty());
        assert_eq!(statement.total_display, "৳0.00");
    }
}
