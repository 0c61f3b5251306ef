//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login            -> login
/// GET  /profile          -> profile (requires auth)
/// POST /change-password  -> change_password (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/profile", get(auth::profile))
        .route("/change-password", post(auth::change_password))
}
