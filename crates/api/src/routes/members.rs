//! Route definitions for the `/admin/members` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::members;
use crate::state::AppState;

/// Routes mounted at `/admin/members`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// GET    /{id}/statement  -> statement
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(members::list).post(members::create))
        .route(
            "/{id}",
            get(members::get_by_id)
                .put(members::update)
                .delete(members::delete),
        )
        .route("/{id}/statement", get(members::statement))
}
