//! Integration tests for the contact/lead pipeline: public submission,
//! admin triage, and CSV export.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, csrf_pair, delete_admin, get_auth, login_token,
    patch_json_admin, post_json,
};
use http_body_util::BodyExt;
use sqlx::PgPool;
use vitrine_db::models::user::UserRole;

fn lead_body(email: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Jane Visitor",
        "email": email,
        "message": "I would like to discuss a project with you.",
        "locale": "fr"
    })
}

async fn admin_session(pool: &PgPool, app: axum::Router) -> String {
    let (_user, password) = create_test_user(pool, "admin@test.com", UserRole::Admin).await;
    login_token(app, "admin@test.com", &password).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn submitting_a_lead_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/leads", lead_body("jane@example.com")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["data"]["id"].is_number());
    assert_eq!(json["data"]["name"], "Jane Visitor");
    assert_eq!(json["data"]["status"], "NEW");
    assert_eq!(json["data"]["source"], "contact_form");
    assert_eq!(json["data"]["locale"], "FR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_submissions_return_field_details(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/leads",
        serde_json::json!({
            "name": "J",
            "email": "not-an-email",
            "message": "too short"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    let details = &json["error"]["details"];
    assert!(details["name"].is_string());
    assert!(details["email"].is_string());
    assert!(details["message"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_listing_is_paginated_newest_first(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_session(&pool, app.clone()).await;

    for i in 0..3 {
        let response = post_json(
            app.clone(),
            "/api/v1/leads",
            lead_body(&format!("visitor{i}@example.com")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(app.clone(), "/api/v1/admin/leads?page=1&limit=2", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["meta"]["page"], 1);
    assert_eq!(json["meta"]["limit"], 2);
    assert_eq!(json["meta"]["total"], 3);
    assert_eq!(json["meta"]["totalPages"], 2);
    assert_eq!(json["data"][0]["email"], "visitor2@example.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_can_move_a_lead_through_the_pipeline(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_session(&pool, app.clone()).await;
    let csrf = csrf_pair(app.clone()).await;

    let created = post_json(app.clone(), "/api/v1/leads", lead_body("jane@example.com")).await;
    let created = body_json(created).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = patch_json_admin(
        app.clone(),
        &format!("/api/v1/admin/leads/{id}"),
        serde_json::json!({ "status": "CONTACTED" }),
        &token,
        &csrf,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "CONTACTED");

    // Unknown status values are rejected by deserialization.
    let response = patch_json_admin(
        app,
        &format!("/api/v1/admin/leads/{id}"),
        serde_json::json!({ "status": "SHIPPED" }),
        &token,
        &csrf,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_a_lead_removes_it(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_session(&pool, app.clone()).await;
    let csrf = csrf_pair(app.clone()).await;

    let created = post_json(app.clone(), "/api/v1/leads", lead_body("jane@example.com")).await;
    let created = body_json(created).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = delete_admin(app.clone(), &format!("/api/v1/admin/leads/{id}"), &token, &csrf).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.clone(), &format!("/api/v1/admin/leads/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_admin(app, &format!("/api/v1/admin/leads/{id}"), &token, &csrf).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn csv_export_quotes_embedded_delimiters(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_session(&pool, app.clone()).await;

    let response = post_json(
        app.clone(),
        "/api/v1/leads",
        serde_json::json!({
            "name": "Doe, Jane",
            "email": "jane@example.com",
            "message": "Line one\nline \"two\", with a comma."
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get_auth(app, "/api/v1/admin/leads/export", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert!(response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("leads.csv"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(csv.starts_with("id,name,email,phone,message,source,status,locale,createdAt"));
    assert!(csv.contains("\"Doe, Jane\""));
    assert!(csv.contains("\"Line one\nline \"\"two\"\", with a comma.\""));
}
