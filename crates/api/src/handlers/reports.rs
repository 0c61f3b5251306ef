//! Handlers for `/admin/reports`.
//!
//! Every report is computed from a fresh snapshot of members and
//! contributions on each request. Nothing is cached.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Datelike, NaiveDate};
use fds_core::ledger::{
    monthly_status as compute_monthly_status, payment_matrix as compute_payment_matrix,
    recent_contributions as compute_recent, MonthlyStatus, PaymentMatrix, RecentContribution,
};
use fds_core::overdue::{last_n_months, overdue_members, OverdueMember, MAX_WINDOW_MONTHS};
use fds_core::locale::month_label;
use fds_core::period::{validate_year, MonthSelector, PeriodSelector, YearMonth};
use fds_db::repositories::MemberRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::today;
use crate::middleware::auth::AuthAdmin;
use crate::query::{LimitParams, OverdueParams, PeriodParams, YearParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// The payment matrix with a display label for the selected period.
#[derive(Debug, Serialize)]
pub struct PaymentMatrixReport {
    #[serde(flatten)]
    pub matrix: PaymentMatrix,
    /// `"মার্চ 2024"` for a single month, the bare year for `all`.
    pub period_label: String,
}

/// Per-month status for one year.
#[derive(Debug, Serialize)]
pub struct MonthlyStatusReport {
    pub year: i32,
    pub member_count: usize,
    /// December first.
    pub months: Vec<MonthlyStatus>,
}

/// Members with unpaid months in the checked window.
#[derive(Debug, Serialize)]
pub struct OverdueReport {
    pub as_of: NaiveDate,
    pub window_months: u32,
    /// The checked months, most recent first.
    pub checked: Vec<YearMonth>,
    pub members: Vec<OverdueMember>,
}

/// GET /api/v1/admin/reports/payment-matrix
///
/// `?year=` defaults to the current year, `?month=` to `all`. A member
/// counts as paid when any selected month is paid.
pub async fn payment_matrix(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Query(params): Query<PeriodParams>,
) -> AppResult<Json<DataResponse<PaymentMatrixReport>>> {
    let selector = PeriodSelector::from_query(params.year, params.month.as_deref(), today())?;
    let snapshot = MemberRepo::ledger_snapshot(&state.pool).await?;

    let lang = params.lang.as_deref().unwrap_or_default();
    let period_label = match (selector.month, params.month.as_deref()) {
        (MonthSelector::Single(_), Some(month)) => {
            format!("{} {}", month_label(month, lang), selector.year)
        }
        _ => selector.year.to_string(),
    };

    Ok(Json(DataResponse {
        data: PaymentMatrixReport {
            matrix: compute_payment_matrix(&snapshot, &selector),
            period_label,
        },
    }))
}

/// GET /api/v1/admin/reports/monthly-status
pub async fn monthly_status(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Query(params): Query<YearParams>,
) -> AppResult<Json<DataResponse<MonthlyStatusReport>>> {
    let year = params.year.unwrap_or_else(|| today().year());
    validate_year(year)?;
    let snapshot = MemberRepo::ledger_snapshot(&state.pool).await?;

    Ok(Json(DataResponse {
        data: MonthlyStatusReport {
            year,
            member_count: snapshot.len(),
            months: compute_monthly_status(&snapshot, year),
        },
    }))
}

/// GET /api/v1/admin/reports/overdue
///
/// `?months=` overrides the configured window (1..=24).
pub async fn overdue(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Query(params): Query<OverdueParams>,
) -> AppResult<Json<DataResponse<OverdueReport>>> {
    let window = params.months.unwrap_or(state.config.overdue_window_months);
    if !(1..=MAX_WINDOW_MONTHS).contains(&window) {
        return Err(AppError::BadRequest(format!(
            "months must be between 1 and {MAX_WINDOW_MONTHS}"
        )));
    }

    let as_of = today();
    let snapshot = MemberRepo::ledger_snapshot(&state.pool).await?;

    Ok(Json(DataResponse {
        data: OverdueReport {
            as_of,
            window_months: window,
            checked: last_n_months(as_of, window),
            members: overdue_members(&snapshot, as_of, window),
        },
    }))
}

/// GET /api/v1/admin/reports/recent-contributions
///
/// `?limit=` defaults to 10, capped at 100.
pub async fn recent_contributions(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<DataResponse<Vec<RecentContribution>>>> {
    let snapshot = MemberRepo::ledger_snapshot(&state.pool).await?;
    Ok(Json(DataResponse {
        data: compute_recent(&snapshot, params.resolve()),
    }))
}
