//! Handlers for the `/admin/members` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Datelike;
use fds_core::error::CoreError;
use fds_core::ledger::{available_years, member_totals, MemberTotals};
use fds_core::locale::Language;
use fds_core::profile::{non_blank, validate_name, validate_phone};
use fds_core::statement::{build_statement, Statement};
use fds_core::types::DbId;
use fds_db::models::member::{CreateMember, Member, MemberWithContributions, UpdateMember};
use fds_db::repositories::MemberRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::today;
use crate::middleware::auth::AuthAdmin;
use crate::query::{LanguageParams, SearchParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// A member with contributions plus derived totals.
#[derive(Debug, Serialize)]
pub struct MemberDetail {
    #[serde(flatten)]
    pub member: MemberWithContributions,
    pub totals: MemberTotals,
    pub available_years: Vec<i32>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Member",
        id,
    })
}

// ---------------------------------------------------------------------------
// Input normalisation
// ---------------------------------------------------------------------------

fn normalize_create(input: CreateMember) -> AppResult<CreateMember> {
    let normalized = CreateMember {
        name: validate_name(&input.name)?,
        phone: non_blank(input.phone.as_deref())
            .map(|p| validate_phone(&p))
            .transpose()?,
        email: non_blank(input.email.as_deref()),
        address: non_blank(input.address.as_deref()),
    };
    normalized.validate()?;
    Ok(normalized)
}

/// `""` counts as `null`: both clear the field.
fn clearable(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(|v| non_blank(v.as_deref()))
}

fn normalize_update(input: UpdateMember) -> AppResult<UpdateMember> {
    let phone = match clearable(input.phone) {
        Some(Some(phone)) => Some(Some(validate_phone(&phone)?)),
        other => other,
    };
    let normalized = UpdateMember {
        name: input.name.as_deref().map(validate_name).transpose()?,
        phone,
        email: clearable(input.email),
        address: clearable(input.address),
    };
    normalized.validate()?;
    Ok(normalized)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/members
///
/// All members with nested contributions, newest member first. `?search=`
/// filters by name, account number, or phone.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<MemberWithContributions>>>> {
    let members =
        MemberRepo::list_with_contributions(&state.pool, params.search.as_deref()).await?;
    Ok(Json(DataResponse { data: members }))
}

/// POST /api/v1/admin/members
///
/// Create a member. The account number is assigned atomically on insert.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Json(input): Json<CreateMember>,
) -> AppResult<(StatusCode, Json<DataResponse<Member>>)> {
    let input = normalize_create(input)?;

    let member = MemberRepo::create(&state.pool, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "No account numbers left to assign".into(),
            ))
        })?;

    tracing::info!(
        member_id = member.id,
        account_number = %member.account_number,
        admin_id = auth.admin_id,
        "Member created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// GET /api/v1/admin/members/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MemberDetail>>> {
    let member = MemberRepo::find_with_contributions(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let ledger = member.to_ledger();
    let detail = MemberDetail {
        totals: member_totals(&ledger, today().year()),
        available_years: available_years(&ledger),
        member,
    };
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/admin/members/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMember>,
) -> AppResult<Json<DataResponse<Member>>> {
    let input = normalize_update(input)?;

    let member = MemberRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(member_id = id, admin_id = auth.admin_id, "Member updated");
    Ok(Json(DataResponse { data: member }))
}

/// DELETE /api/v1/admin/members/{id}
///
/// Deletes the member and, by cascade, all of their contributions.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MemberRepo::delete(&state.pool, id).await? {
        tracing::info!(member_id = id, admin_id = auth.admin_id, "Member deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/v1/admin/members/{id}/statement
///
/// Account statement with localised period labels (`?lang=en|bn`).
pub async fn statement(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Path(id): Path<DbId>,
    Query(params): Query<LanguageParams>,
) -> AppResult<Json<DataResponse<Statement>>> {
    let member = MemberRepo::find_with_contributions(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let language = params
        .lang
        .as_deref()
        .map(Language::from_code)
        .unwrap_or_default();
    let statement = build_statement(&member.to_ledger(), today(), language);

    Ok(Json(DataResponse { data: statement }))
}
