//! Integration tests for recording and editing contributions.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, create_contribution, create_member, delete_auth, get_auth,
    post_json_auth, put_json_auth,
};
use serde_json::json;
use sqlx::SqlitePool;

/// Create a member and return its id.
async fn member_id(app: axum::Router, token: &str, name: &str) -> i64 {
    create_member(app, token, json!({ "name": name })).await["id"]
        .as_i64()
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_contribution_stores_amount_in_cents(pool: SqlitePool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let id = member_id(app.clone(), &token, "Karim").await;

    let response = post_json_auth(
        app,
        "/api/v1/admin/contributions",
        json!({
            "member_id": id,
            "month": "02",
            "year": 2024,
            "amount": 500.0,
            "payment_date": "2024-02-10T09:00:00Z",
            "description": " February deposit ",
        }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["member_id"], id);
    assert_eq!(json["data"]["month"], "02");
    assert_eq!(json["data"]["year"], 2024);
    assert_eq!(json["data"]["amount_cents"], 50_000);
    assert_eq!(json["data"]["description"], "February deposit");
    assert!(json["data"]["payment_date"]
        .as_str()
        .unwrap()
        .starts_with("2024-02-10T09:00:00"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_period_is_rejected(pool: SqlitePool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let id = member_id(app.clone(), &token, "Karim").await;

    let first = create_contribution(app.clone(), &token, id, "03", 2024, 500.0).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = create_contribution(app.clone(), &token, id, "03", 2024, 700.0).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(
        json["error"],
        "Contribution for 03/2024 already exists for member 0001"
    );

    // Same month of another year, and another month of the same year, are fine.
    let other_year = create_contribution(app.clone(), &token, id, "03", 2023, 500.0).await;
    assert_eq!(other_year.status(), StatusCode::CREATED);
    let other_month = create_contribution(app, &token, id, "04", 2024, 500.0).await;
    assert_eq!(other_month.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn same_period_for_different_members_is_allowed(pool: SqlitePool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let karim = member_id(app.clone(), &token, "Karim").await;
    let rahima = member_id(app.clone(), &token, "Rahima").await;

    let a = create_contribution(app.clone(), &token, karim, "01", 2024, 500.0).await;
    let b = create_contribution(app, &token, rahima, "01", 2024, 500.0).await;

    assert_eq!(a.status(), StatusCode::CREATED);
    assert_eq!(b.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_input_is_rejected(pool: SqlitePool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let id = member_id(app.clone(), &token, "Karim").await;

    for (month, year, amount) in [
        ("13", 2024, 500.0),
        ("3", 2024, 500.0),
        ("03", 1999, 500.0),
        ("03", 2024, 0.0),
        ("03", 2024, -5.0),
    ] {
        let response = create_contribution(app.clone(), &token, id, month, year, amount).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "{month}/{year} amount {amount}"
        );
    }

    let listed = body_json(get_auth(app, "/api/v1/admin/contributions", &token).await).await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_member_returns_404(pool: SqlitePool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = create_contribution(app, &token, 42, "01", 2024, 500.0).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Member with id 42 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_member_and_period(pool: SqlitePool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let karim = member_id(app.clone(), &token, "Karim").await;
    let rahima = member_id(app.clone(), &token, "Rahima").await;

    for (member, month, year) in [
        (karim, "01", 2024),
        (karim, "02", 2024),
        (karim, "01", 2023),
        (rahima, "01", 2024),
    ] {
        let response = create_contribution(app.clone(), &token, member, month, year, 100.0).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let count = |json: serde_json::Value| json["data"].as_array().unwrap().len();

    let all = body_json(get_auth(app.clone(), "/api/v1/admin/contributions", &token).await).await;
    assert_eq!(count(all), 4);

    let by_member = body_json(
        get_auth(
            app.clone(),
            &format!("/api/v1/admin/contributions?member_id={karim}"),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(count(by_member), 3);

    let by_period = body_json(
        get_auth(
            app.clone(),
            "/api/v1/admin/contributions?year=2024&month=01",
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(count(by_period), 2);

    let bad_month = get_auth(app, "/api/v1/admin/contributions?month=1", &token).await;
    assert_eq!(bad_month.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_changes_amount_and_period(pool: SqlitePool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let id = member_id(app.clone(), &token, "Karim").await;

    let created = body_json(create_contribution(app.clone(), &token, id, "01", 2024, 500.0).await)
        .await;
    let contribution_id = created["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/contributions/{contribution_id}"),
        json!({ "month": "02", "amount": 750.25 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["month"], "02");
    assert_eq!(json["data"]["year"], 2024);
    assert_eq!(json["data"]["amount_cents"], 75_025);

    let fetched = body_json(
        get_auth(
            app,
            &format!("/api/v1/admin/contributions/{contribution_id}"),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(fetched["data"]["amount_cents"], 75_025);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_can_clear_description(pool: SqlitePool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let id = member_id(app.clone(), &token, "Karim").await;

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/admin/contributions",
            json!({
                "member_id": id,
                "month": "03",
                "year": 2024,
                "amount": 500.0,
                "description": "Bank transfer",
            }),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(created["data"]["description"], "Bank transfer");
    let uri = format!("/api/v1/admin/contributions/{}", created["data"]["id"]);

    let kept = body_json(put_json_auth(app.clone(), &uri, json!({ "amount": 600.0 }), &token).await).await;
    assert_eq!(kept["data"]["description"], "Bank transfer");

    let cleared =
        body_json(put_json_auth(app, &uri, json!({ "description": null }), &token).await).await;
    assert!(cleared["data"]["description"].is_null());
    assert_eq!(cleared["data"]["amount_cents"], 60_000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_into_occupied_period_is_rejected(pool: SqlitePool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let id = member_id(app.clone(), &token, "Karim").await;

    create_contribution(app.clone(), &token, id, "01", 2024, 500.0).await;
    let second = body_json(create_contribution(app.clone(), &token, id, "02", 2024, 500.0).await)
        .await;
    let second_id = second["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/contributions/{second_id}"),
        json!({ "month": "01" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Re-saving the same period is not a conflict with itself.
    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/contributions/{second_id}"),
        json!({ "month": "02", "year": 2024 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_contribution(pool: SqlitePool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let id = member_id(app.clone(), &token, "Karim").await;

    let created = body_json(create_contribution(app.clone(), &token, id, "01", 2024, 500.0).await)
        .await;
    let contribution_id = created["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/admin/contributions/{contribution_id}");

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The period is free again.
    let again = create_contribution(app, &token, id, "01", 2024, 500.0).await;
    assert_eq!(again.status(), StatusCode::CREATED);
}
