//! Public member lookup by account number.

use axum::extract::{Path, State};
use axum::Json;
use fds_core::account::parse_account_number;
use fds_core::error::CoreError;
use fds_db::models::member::MemberWithContributions;
use fds_db::repositories::MemberRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/member/{account_number}
///
/// No authentication: the account number is the member's only credential.
/// Returns the member with contributions, newest payment first.
pub async fn get_by_account_number(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> AppResult<Json<DataResponse<MemberWithContributions>>> {
    parse_account_number(&account_number)?;

    let member = MemberRepo::find_with_contributions_by_account(&state.pool, &account_number)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundBy {
                entity: "Member",
                key: account_number.clone(),
            })
        })?;

    Ok(Json(DataResponse { data: member }))
}
