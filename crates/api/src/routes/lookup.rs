//! Public member lookup route.

use axum::routing::get;
use axum::Router;

use crate::handlers::lookup;
use crate::state::AppState;

/// ```text
/// GET /member/{account_number}  -> get_by_account_number (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/member/{account_number}",
        get(lookup::get_by_account_number),
    )
}
