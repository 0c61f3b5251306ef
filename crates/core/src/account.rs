//! Member account numbers.
//!
//! An account number is exactly four ASCII digits, zero padded, starting at
//! `"0001"`. Numbers are issued in strictly increasing order and a number is
//! never handed out twice, even after the member holding it is deleted.

use crate::error::CoreError;

/// Width of an account number in digits.
pub const ACCOUNT_NUMBER_WIDTH: usize = 4;

/// Largest number representable in [`ACCOUNT_NUMBER_WIDTH`] digits.
pub const MAX_ACCOUNT_NUMBER: u32 = 9999;

/// Render `n` as a zero-padded account number.
///
/// Returns `None` for `0` and anything above [`MAX_ACCOUNT_NUMBER`].
pub fn format_account_number(n: u32) -> Option<String> {
    if n == 0 || n > MAX_ACCOUNT_NUMBER {
        return None;
    }
    Some(format!("{n:0width$}", width = ACCOUNT_NUMBER_WIDTH))
}

/// Parse an account number string, requiring exactly four ASCII digits.
pub fn parse_account_number(s: &str) -> Result<u32, CoreError> {
    if s.len() != ACCOUNT_NUMBER_WIDTH || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "Invalid account number '{s}': expected {ACCOUNT_NUMBER_WIDTH} digits"
        )));
    }
    s.parse::<u32>()
        .map_err(|_| CoreError::Validation(format!("Invalid account number '{s}'")))
}

/// Compute the next account number to issue.
///
/// `high_water` is the largest number ever issued (it survives deletions);
/// `existing` are the account numbers currently on record. The result is
/// `max(high_water, max(existing)) + 1`, so gaps are never back-filled.
/// Values in `existing` that do not parse are ignored.
///
/// Returns `None` once the four-digit space is exhausted.
///
/// ```
/// use fds_core::account::next_account_number;
///
/// assert_eq!(next_account_number(0, ["0001", "0003"]).as_deref(), Some("0004"));
/// assert_eq!(next_account_number(0, Vec::<&str>::new()).as_deref(), Some("0001"));
/// ```
pub fn next_account_number<'a, I>(high_water: u32, existing: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let max_existing = existing
        .into_iter()
        .filter_map(|s| parse_account_number(s).ok())
        .max()
        .unwrap_or(0);

    let next = high_water.max(max_existing).checked_add(1)?;
    format_account_number(next)
}
