//! The admin extractor guarding every `/admin` route.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use fds_core::error::CoreError;
use fds_core::types::DbId;

use crate::auth::token::{verify_token, Claims};
use crate::error::AppError;
use crate::state::AppState;

/// The admin on whose behalf a request runs.
///
/// Taking `AuthAdmin` as a handler argument makes the route require a valid
/// `Authorization: Bearer <token>` header; requests without one are answered
/// with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub admin_id: DbId,
    pub username: String,
}

impl From<Claims> for AuthAdmin {
    fn from(claims: Claims) -> Self {
        Self {
            admin_id: claims.sub,
            username: claims.username,
        }
    }
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_owned()))
}

/// The token from an `Authorization: Bearer` header. The scheme name is
/// matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?
        .to_str()
        .map_err(|_| unauthorized("Malformed Authorization header"))?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>",
        )),
    }
}

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let claims = verify_token(token, &state.config.token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            unauthorized("Invalid or expired token")
        })?;

        Ok(claims.into())
    }
}
