//! Handlers for the `/admin/contributions` resource.
//!
//! A member pays at most once per month: creates and period-changing
//! updates are checked up front, and a unique violation from a racing
//! write is reported the same way.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use fds_core::error::CoreError;
use fds_core::locale::amount_to_cents;
use fds_core::period::{validate_year, Month, YearMonth};
use fds_core::profile::non_blank;
use fds_core::types::{DbId, Timestamp};
use fds_db::models::contribution::{
    Contribution, ContributionFilter, CreateContribution, UpdateContribution,
};
use fds_db::models::member::Member;
use fds_db::models::nullable;
use fds_db::repositories::{ContributionRepo, MemberRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::query::ContributionListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/contributions`. `amount` is in taka.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContributionRequest {
    pub member_id: DbId,
    pub month: String,
    #[validate(range(min = 2000, max = 2100, message = "Year must be between 2000 and 2100"))]
    pub year: i32,
    #[validate(range(exclusive_min = 0.0, message = "Amount must be greater than 0"))]
    pub amount: f64,
    /// Defaults to now.
    pub payment_date: Option<Timestamp>,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

/// Request body for `PUT /admin/contributions/{id}`. Absent fields are kept;
/// a `null` or blank `description` clears it.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateContributionRequest {
    pub month: Option<String>,
    #[validate(range(min = 2000, max = 2100, message = "Year must be between 2000 and 2100"))]
    pub year: Option<i32>,
    #[validate(range(exclusive_min = 0.0, message = "Amount must be greater than 0"))]
    pub amount: Option<f64>,
    pub payment_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<Option<String>>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Contribution",
        id,
    })
}

fn duplicate_period(month: Month, year: i32, member: &Member) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Contribution for {} already exists for member {}",
        YearMonth::new(year, month),
        member.account_number
    )))
}

async fn find_member(state: &AppState, member_id: DbId) -> AppResult<Member> {
    MemberRepo::find_by_id(&state.pool, member_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Member",
            id: member_id,
        }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/contributions
///
/// Optional filters: `?member_id=&year=&month=`. Newest payment first.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Query(params): Query<ContributionListParams>,
) -> AppResult<Json<DataResponse<Vec<Contribution>>>> {
    let month = params
        .month
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(Month::parse)
        .transpose()?;

    let filter = ContributionFilter {
        member_id: params.member_id,
        year: params.year,
        month,
    };
    let contributions = ContributionRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse {
        data: contributions,
    }))
}

/// POST /api/v1/admin/contributions
///
/// Record a contribution. Rejects a second contribution for the same member
/// and period with 409.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Json(input): Json<CreateContributionRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Contribution>>)> {
    input.validate()?;
    let month = Month::parse(input.month.trim())?;
    validate_year(input.year)?;
    let amount_cents = amount_to_cents(input.amount)?;

    let member = find_member(&state, input.member_id).await?;

    if ContributionRepo::find_for_period(&state.pool, member.id, month, input.year)
        .await?
        .is_some()
    {
        return Err(duplicate_period(month, input.year, &member));
    }

    let create = CreateContribution {
        member_id: member.id,
        month,
        year: input.year,
        amount_cents,
        payment_date: input.payment_date.unwrap_or_else(Utc::now),
        description: non_blank(input.description.as_deref()),
    };

    let contribution = ContributionRepo::create(&state.pool, &create)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_period(month, input.year, &member)
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(
        contribution_id = contribution.id,
        member_id = member.id,
        period = %YearMonth::new(contribution.year, contribution.month),
        amount_cents = contribution.amount_cents,
        admin_id = auth.admin_id,
        "Contribution recorded"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: contribution })))
}

/// GET /api/v1/admin/contributions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Contribution>>> {
    let contribution = ContributionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: contribution }))
}

/// PUT /api/v1/admin/contributions/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContributionRequest>,
) -> AppResult<Json<DataResponse<Contribution>>> {
    input.validate()?;
    let month = input
        .month
        .as_deref()
        .map(|m| Month::parse(m.trim()))
        .transpose()?;
    if let Some(year) = input.year {
        validate_year(year)?;
    }
    let amount_cents = input.amount.map(amount_to_cents).transpose()?;

    let existing = ContributionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let member = find_member(&state, existing.member_id).await?;

    let target_month = month.unwrap_or(existing.month);
    let target_year = input.year.unwrap_or(existing.year);
    if (target_month, target_year) != (existing.month, existing.year) {
        let occupied =
            ContributionRepo::find_for_period(&state.pool, member.id, target_month, target_year)
                .await?;
        if occupied.is_some_and(|c| c.id != id) {
            return Err(duplicate_period(target_month, target_year, &member));
        }
    }

    let update = UpdateContribution {
        month,
        year: input.year,
        amount_cents,
        payment_date: input.payment_date,
        description: input.description.map(|d| non_blank(d.as_deref())),
    };

    let contribution = ContributionRepo::update(&state.pool, id, &update)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_period(target_month, target_year, &member)
            } else {
                AppError::Database(e)
            }
        })?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(contribution_id = id, admin_id = auth.admin_id, "Contribution updated");
    Ok(Json(DataResponse { data: contribution }))
}

/// DELETE /api/v1/admin/contributions/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ContributionRepo::delete(&state.pool, id).await? {
        tracing::info!(contribution_id = id, admin_id = auth.admin_id, "Contribution deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
