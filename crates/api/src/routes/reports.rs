//! Route definitions for `/admin/reports`.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/admin/reports`.
///
/// ```text
/// GET /payment-matrix        -> payment_matrix
/// GET /monthly-status        -> monthly_status
/// GET /overdue               -> overdue
/// GET /recent-contributions  -> recent_contributions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/payment-matrix", get(reports::payment_matrix))
        .route("/monthly-status", get(reports::monthly_status))
        .route("/overdue", get(reports::overdue))
        .route("/recent-contributions", get(reports::recent_contributions))
}
