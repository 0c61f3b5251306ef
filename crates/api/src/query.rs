//! Shared query parameter types for API handlers.

use fds_core::types::DbId;
use serde::Deserialize;

/// Default number of rows for "recent" feeds.
pub const DEFAULT_RECENT_LIMIT: i64 = 10;
/// Upper bound for `?limit=`.
pub const MAX_RECENT_LIMIT: i64 = 100;

/// `?year=&month=` selector for the payment matrix. `month` is `01`..`12`
/// or `all`; `lang` localises the period label.
#[derive(Debug, Deserialize)]
pub struct PeriodParams {
    pub year: Option<i32>,
    pub month: Option<String>,
    pub lang: Option<String>,
}

/// `?year=` for yearly reports.
#[derive(Debug, Deserialize)]
pub struct YearParams {
    pub year: Option<i32>,
}

/// `?months=` window override for the overdue report.
#[derive(Debug, Deserialize)]
pub struct OverdueParams {
    pub months: Option<u32>,
}

/// `?limit=` for recent activity feeds.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

impl LimitParams {
    /// The requested limit clamped to `1..=MAX_RECENT_LIMIT`.
    pub fn resolve(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_RECENT_LIMIT)
            .clamp(1, MAX_RECENT_LIMIT) as usize
    }
}

/// `?search=` free-text member filter.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// `?lang=` for localised output (`en`, `bn`).
#[derive(Debug, Deserialize)]
pub struct LanguageParams {
    pub lang: Option<String>,
}

/// Filters for listing contributions.
#[derive(Debug, Deserialize)]
pub struct ContributionListParams {
    pub member_id: Option<DbId>,
    pub year: Option<i32>,
    pub month: Option<String>,
}
