pub mod auth;
pub mod contributions;
pub mod health;
pub mod lookup;
pub mod members;
pub mod reports;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                  login (public)
/// /auth/profile                                current admin
/// /auth/change-password                        change password (POST)
///
/// /member/{account_number}                     public lookup
///
/// /admin/members                               list (?search=), create
/// /admin/members/{id}                          get, update, delete
/// /admin/members/{id}/statement                statement (?lang=)
///
/// /admin/contributions                         list (?member_id=&year=&month=), create
/// /admin/contributions/{id}                    get, update, delete
///
/// /admin/reports/payment-matrix                matrix + stats (?year=&month=)
/// /admin/reports/monthly-status                per-month counts (?year=)
/// /admin/reports/overdue                       overdue members (?months=)
/// /admin/reports/recent-contributions          latest payments (?limit=)
///
/// /admin/dashboard                             summary
/// ```
///
/// Everything under `/admin` and `/auth` except `/auth/login` requires a
/// Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(lookup::router())
        .nest("/admin/members", members::router())
        .nest("/admin/contributions", contributions::router())
        .nest("/admin/reports", reports::router())
        .route("/admin/dashboard", get(handlers::dashboard::summary))
}
