//! Route definitions for the `/admin/contributions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::contributions;
use crate::state::AppState;

/// Routes mounted at `/admin/contributions`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contributions::list).post(contributions::create))
        .route(
            "/{id}",
            get(contributions::get_by_id)
                .put(contributions::update)
                .delete(contributions::delete),
        )
}
