//! Integration tests for the public account-number lookup.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, create_contribution, create_member, get};
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_account_number_is_rejected(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    for bad in ["12", "12345", "abcd"] {
        let response = get(app.clone(), &format!("/api/v1/member/{bad}")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{bad}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_account_number_returns_404(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/member/0042").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Member '0042' not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookup_returns_contributions_newest_first(pool: SqlitePool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let member = create_member(app.clone(), &token, json!({ "name": "Karim" })).await;
    let id = member["id"].as_i64().unwrap();
    create_contribution(app.clone(), &token, id, "01", 2024, 500.0).await;
    create_contribution(app.clone(), &token, id, "02", 2024, 500.0).await;

    let response = get(app, "/api/v1/member/0001").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let contributions = json["data"]["contributions"].as_array().unwrap();
    assert_eq!(contributions.len(), 2);
    assert_eq!(contributions[0]["month"], "02");
    assert_eq!(contributions[1]["month"], "01");
}
