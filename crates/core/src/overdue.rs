//! Overdue member detection.
//!
//! A member is overdue when any of the last `n` calendar months (the current
//! month included) has no contribution. The window walks backward from
//! `today` and rolls over year boundaries.

use chrono::NaiveDate;
use serde::Serialize;

use crate::ledger::MemberLedger;
use crate::period::YearMonth;
use crate::types::DbId;

/// Default number of months checked when none is configured.
pub const DEFAULT_WINDOW_MONTHS: u32 = 2;

/// Largest window accepted from callers.
pub const MAX_WINDOW_MONTHS: u32 = 24;

/// A member with at least one unpaid month in the checked window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverdueMember {
    pub member_id: DbId,
    pub account_number: String,
    pub name: String,
    /// Number of checked months without a contribution (1..=n).
    pub overdue_months: u32,
    /// The unpaid months, most recent first.
    pub missing: Vec<YearMonth>,
}

/// The `n` calendar months ending with the month of `today`, most recent first.
///
/// ```
/// use chrono::NaiveDate;
/// use fds_core::overdue::last_n_months;
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let months: Vec<String> = last_n_months(today, 2).iter().map(|m| m.to_string()).collect();
/// assert_eq!(months, ["01/2024", "12/2023"]);
/// ```
pub fn last_n_months(today: NaiveDate, n: u32) -> Vec<YearMonth> {
    std::iter::successors(Some(YearMonth::from_date(today)), |ym| Some(ym.previous()))
        .take(n as usize)
        .collect()
}

/// Members missing a contribution in any of the last `n` months.
///
/// Members are returned in input order. Members with every checked month
/// paid are omitted.
pub fn overdue_members(members: &[MemberLedger], today: NaiveDate, n: u32) -> Vec<OverdueMember> {
    let window = last_n_months(today, n);

    members
        .iter()
        .filter_map(|member| {
            let missing: Vec<YearMonth> = window
                .iter()
                .copied()
                .filter(|ym| !member.has_payment(ym.year, ym.month))
                .collect();

            if missing.is_empty() {
                return None;
            }

            Some(OverdueMember {
                member_id: member.member_id,
                account_number: member.account_number.clone(),
                name: member.name.clone(),
                overdue_months: missing.len() as u32,
                missing,
            })
        })
        .collect()
}
