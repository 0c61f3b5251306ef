//! Admin dashboard summary.

use axum::extract::State;
use axum::Json;
use fds_core::ledger::{
    collection_total, payment_stats, recent_contributions, PaymentStats, RecentContribution,
};
use fds_core::locale::format_taka;
use fds_core::period::{MonthSelector, PeriodSelector, YearMonth};
use fds_core::types::Cents;
use fds_db::repositories::MemberRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::today;
use crate::middleware::auth::AuthAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of payments shown in the dashboard activity list.
const DASHBOARD_RECENT: usize = 5;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub member_count: usize,
    pub total_collected_cents: Cents,
    pub total_collected_display: String,
    /// `None` once every four-digit number has been issued.
    pub next_account_number: Option<String>,
    pub current_month: YearMonth,
    pub current_month_stats: PaymentStats,
    pub recent_contributions: Vec<RecentContribution>,
}

/// GET /api/v1/admin/dashboard
pub async fn summary(
    State(state): State<AppState>,
    _auth: AuthAdmin,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let snapshot = MemberRepo::ledger_snapshot(&state.pool).await?;
    let next_account_number = MemberRepo::peek_next_account_number(&state.pool).await?;

    let current_month = YearMonth::from_date(today());
    let selector = PeriodSelector::new(
        current_month.year,
        MonthSelector::Single(current_month.month),
    )?;
    let total = collection_total(&snapshot);

    Ok(Json(DataResponse {
        data: DashboardSummary {
            member_count: snapshot.len(),
            total_collected_cents: total,
            total_collected_display: format_taka(total),
            next_account_number,
            current_month,
            current_month_stats: payment_stats(&snapshot, &selector),
            recent_contributions: recent_contributions(&snapshot, DASHBOARD_RECENT),
        },
    }))
}
