//! Month names and currency formatting in English and Bengali.

use crate::error::CoreError;
use crate::types::Cents;

/// Taka sign used when rendering amounts.
pub const TAKA_SIGN: char = '৳';

/// Upper bound for a single amount (one billion taka) to keep cents in range.
const MAX_AMOUNT: f64 = 1_000_000_000.0;

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_BN: [&str; 12] = [
    "জানুয়ারি",
    "ফেব্রুয়ারি",
    "মার্চ",
    "এপ্রিল",
    "মে",
    "জুন",
    "জুলাই",
    "আগস্ট",
    "সেপ্টেম্বর",
    "অক্টোবর",
    "নভেম্বর",
    "ডিসেম্বর",
];

/// Display language for month names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Bengali,
}

impl Language {
    /// Resolve a language code (`"en"`, `"bn"`). Unknown codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "bn" | "bn-bd" => Language::Bengali,
            _ => Language::English,
        }
    }

    fn months(self) -> &'static [&'static str; 12] {
        match self {
            Language::English => &MONTHS_EN,
            Language::Bengali => &MONTHS_BN,
        }
    }
}

/// Name of month `month` (1..=12) in `language`.
///
/// Months outside 1..=12 are returned unchanged as their decimal value.
///
/// ```
/// use fds_core::locale::month_name;
///
/// assert_eq!(month_name(5, "en"), "May");
/// assert_eq!(month_name(13, "en"), "13");
/// ```
pub fn month_name(month: u32, language: &str) -> String {
    match month.checked_sub(1).and_then(|i| {
        Language::from_code(language)
            .months()
            .get(i as usize)
            .copied()
    }) {
        Some(name) => name.to_string(),
        None => month.to_string(),
    }
}

/// Name of a textual month (`"03"`, `"3"`), passing unparseable or
/// out-of-range input through unchanged.
pub fn month_label(month: &str, language: &str) -> String {
    match month.trim().parse::<u32>() {
        Ok(n) if (1..=12).contains(&n) => month_name(n, language),
        _ => month.to_string(),
    }
}

/// Render an amount in minor units with two decimals (`123450` -> `"1234.50"`).
pub fn format_amount(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Render an amount with the taka sign (`123450` -> `"৳1234.50"`).
pub fn format_taka(cents: Cents) -> String {
    format!("{TAKA_SIGN}{}", format_amount(cents))
}

/// Convert a decimal taka amount into minor units.
///
/// Rounds to the nearest poisha. Rejects non-finite, non-positive, and
/// absurdly large values.
pub fn amount_to_cents(amount: f64) -> Result<Cents, CoreError> {
    if !amount.is_finite() {
        return Err(CoreError::Validation("Amount must be a number".into()));
    }
    if amount > MAX_AMOUNT {
        return Err(CoreError::Validation(format!(
            "Amount must not exceed {MAX_AMOUNT:.0}"
        )));
    }
    let cents = (amount * 100.0).round() as Cents;
    if cents <= 0 {
        return Err(CoreError::Validation(
            "Amount must be greater than 0".into(),
        ));
    }
    Ok(cents)
}
