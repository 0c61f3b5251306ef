//! Calendar periods used by contributions and reports.
//!
//! - [`Month`] -- a validated calendar month, rendered as `"01"`..`"12"`.
//! - [`YearMonth`] -- a `(year, month)` pair with backward rollover.
//! - [`PeriodSelector`] -- the `(year, month | all)` selector for reports.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Earliest year accepted for a contribution or report.
pub const MIN_YEAR: i32 = 2000;
/// Latest year accepted for a contribution or report.
pub const MAX_YEAR: i32 = 2100;

/// Query value selecting every month of a year.
pub const ALL_MONTHS: &str = "all";

// ---------------------------------------------------------------------------
// Month
// ---------------------------------------------------------------------------

/// A calendar month (1..=12). Serialized as a two-digit string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month(u8);

impl Month {
    pub const JANUARY: Month = Month(1);
    pub const DECEMBER: Month = Month(12);

    /// Build a month from its number, rejecting anything outside 1..=12.
    pub fn new(number: u32) -> Result<Self, CoreError> {
        if (1..=12).contains(&number) {
            Ok(Month(number as u8))
        } else {
            Err(CoreError::Validation(format!(
                "Month must be between 01 and 12, got {number}"
            )))
        }
    }

    /// Parse the stored two-digit form (`"01"`..`"12"`).
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let invalid =
            || CoreError::Validation(format!("Month must be a 2-digit value 01-12, got '{s}'"));

        if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number: u32 = s.parse().map_err(|_| invalid())?;
        Month::new(number).map_err(|_| invalid())
    }

    /// The month number (1..=12).
    pub fn number(self) -> u32 {
        u32::from(self.0)
    }

    /// Zero-based index into month tables.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// All twelve months in calendar order.
    pub fn all() -> impl DoubleEndedIterator<Item = Month> {
        (1..=12u8).map(Month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl TryFrom<String> for Month {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Month::parse(&value)
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

/// Validate that a year lies within [`MIN_YEAR`]..=[`MAX_YEAR`].
pub fn validate_year(year: i32) -> Result<(), CoreError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
        )))
    }
}

// ---------------------------------------------------------------------------
// YearMonth
// ---------------------------------------------------------------------------

/// A specific calendar month of a specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: Month,
}

impl YearMonth {
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: Month(date.month() as u8),
        }
    }

    /// The calendar month immediately before this one.
    ///
    /// January rolls back to December of the previous year.
    pub fn previous(self) -> Self {
        if self.month == Month::JANUARY {
            Self {
                year: self.year - 1,
                month: Month::DECEMBER,
            }
        } else {
            Self {
                year: self.year,
                month: Month(self.month.0 - 1),
            }
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

// ---------------------------------------------------------------------------
// Report selector
// ---------------------------------------------------------------------------

/// Which months of the selected year a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthSelector {
    All,
    Single(Month),
}

impl MonthSelector {
    /// Parse `"all"` or a two-digit month.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if s.eq_ignore_ascii_case(ALL_MONTHS) {
            Ok(MonthSelector::All)
        } else {
            Month::parse(s).map(MonthSelector::Single)
        }
    }
}

impl fmt::Display for MonthSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthSelector::All => f.write_str(ALL_MONTHS),
            MonthSelector::Single(month) => month.fmt(f),
        }
    }
}

impl Serialize for MonthSelector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Validated `(year, month | all)` selector for the payment matrix and
/// statistics reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodSelector {
    pub year: i32,
    pub month: MonthSelector,
}

impl PeriodSelector {
    pub fn new(year: i32, month: MonthSelector) -> Result<Self, CoreError> {
        validate_year(year)?;
        Ok(Self { year, month })
    }

    /// Build a selector from optional query values.
    ///
    /// A missing year defaults to the year of `today`; a missing or empty
    /// month defaults to all months.
    pub fn from_query(
        year: Option<i32>,
        month: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, CoreError> {
        let year = year.unwrap_or_else(|| today.year());
        let month = match month.map(str::trim).filter(|m| !m.is_empty()) {
            Some(m) => MonthSelector::parse(m)?,
            None => MonthSelector::All,
        };
        Self::new(year, month)
    }

    /// The months covered by this selector, in calendar order.
    pub fn months(&self) -> Vec<Month> {
        match self.month {
            MonthSelector::All => Month::all().collect(),
            MonthSelector::Single(month) => vec![month],
        }
    }
}
