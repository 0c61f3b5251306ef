//! How `AppError` values turn into `{error, code}` responses, including
//! errors raised by the real schema constraints.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use fds_api::error::{is_unique_violation, AppError};
use fds_core::error::CoreError;
use http_body_util::BodyExt;
use sqlx::SqlitePool;

const SANITIZED: &str = "An internal error occurred";

async fn render(err: impl Into<AppError>) -> (StatusCode, String, String) {
    let response = err.into().into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (
        status,
        body["code"].as_str().unwrap().to_owned(),
        body["error"].as_str().unwrap().to_owned(),
    )
}

async fn insert_member(pool: &SqlitePool, account: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO members (account_number, name) VALUES (?, 'Rahim') RETURNING id")
        .bind(account)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn insert_contribution(pool: &SqlitePool, member_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO contributions (member_id, month, year, amount_cents, payment_date) \
         VALUES (?, '03', 2024, 50000, '2024-03-05')",
    )
    .bind(member_id)
    .execute(pool)
    .await
    .map(|_| ())
}

#[tokio::test]
async fn missing_records_name_the_entity() {
    let by_id = CoreError::NotFound { entity: "Contribution", id: 7 };
    assert_eq!(
        render(by_id).await,
        (
            StatusCode::NOT_FOUND,
            String::from("NOT_FOUND"),
            String::from("Contribution with id 7 not found")
        )
    );

    let by_account = CoreError::NotFoundBy { entity: "Member", key: "0042".into() };
    let (status, _, message) = render(by_account).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message, "Member '0042' not found");
}

#[tokio::test]
async fn client_mistakes_keep_their_message() {
    let (status, code, message) =
        render(CoreError::Validation("Month must be between 01 and 12".into())).await;
    assert_eq!((status, code.as_str()), (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"));
    assert_eq!(message, "Month must be between 01 and 12");

    let (status, code, _) = render(AppError::BadRequest("year must be a number".into())).await;
    assert_eq!((status, code.as_str()), (StatusCode::BAD_REQUEST, "BAD_REQUEST"));

    let duplicate = CoreError::Conflict("Contribution for 03/2024 already exists for member 0001".into());
    let (status, code, message) = render(duplicate).await;
    assert_eq!((status, code.as_str()), (StatusCode::CONFLICT, "CONFLICT"));
    assert!(message.starts_with("Contribution for 03/2024"));

    let (status, code, _) = render(CoreError::Unauthorized("Invalid or expired token".into())).await;
    assert_eq!((status, code.as_str()), (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"));
}

#[tokio::test]
async fn server_side_failures_hide_details() {
    let failures: Vec<AppError> = vec![
        CoreError::Internal("ledger total overflowed".into()).into(),
        AppError::Token(jsonwebtoken::errors::ErrorKind::InvalidKeyFormat.into()),
        AppError::Password(argon2::password_hash::Error::PhcStringField),
        AppError::Database(sqlx::Error::PoolTimedOut),
    ];

    for err in failures {
        let (status, code, message) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "INTERNAL_ERROR");
        assert_eq!(message, SANITIZED);
    }
}

#[tokio::test]
async fn row_not_found_is_a_404() {
    let (status, code, _) = render(sqlx::Error::RowNotFound).await;
    assert_eq!((status, code.as_str()), (StatusCode::NOT_FOUND, "NOT_FOUND"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_contribution_for_a_period_is_a_conflict(pool: SqlitePool) {
    let member_id = insert_member(&pool, "0001").await;
    insert_contribution(&pool, member_id).await.unwrap();

    let err = insert_contribution(&pool, member_id).await.unwrap_err();
    assert!(is_unique_violation(&err));

    let (status, code, _) = render(err).await;
    assert_eq!((status, code.as_str()), (StatusCode::CONFLICT, "CONFLICT"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contribution_for_missing_member_is_rejected(pool: SqlitePool) {
    let err = insert_contribution(&pool, 404).await.unwrap_err();
    assert!(!is_unique_violation(&err));

    let (status, code, message) = render(err).await;
    assert_eq!((status, code.as_str()), (StatusCode::BAD_REQUEST, "BAD_REQUEST"));
    assert_eq!(message, "Referenced record does not exist");
}
