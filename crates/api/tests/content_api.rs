//! Integration tests for translatable content blocks and the CSRF
//! double-submit guard on admin mutations.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, StatusCode};
use common::{
    body_json, create_test_user, csrf_pair, delete_admin, get, login_token, post_json_admin,
    put_json_admin,
};
use sqlx::PgPool;
use tower::ServiceExt;
use vitrine_db::models::user::UserRole;

fn hero_content() -> serde_json::Value {
    serde_json::json!({
        "key": "home.hero.title",
        "type": "TEXT",
        "translations": [
            { "locale": "en", "value": "Welcome" },
            { "locale": "fr", "value": "Bienvenue" }
        ]
    })
}

async fn editor_session(pool: &PgPool, app: axum::Router) -> String {
    let (_user, password) = create_test_user(pool, "editor@test.com", UserRole::Editor).await;
    login_token(app, "editor@test.com", &password).await
}

// ---------------------------------------------------------------------------
// CSRF
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_mutations_without_csrf_are_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = editor_session(&pool, app.clone()).await;

    // No cookie, no header.
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/admin/content")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(hero_content().to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Cookie present but the header token does not match.
    let csrf = csrf_pair(app.clone()).await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/admin/content")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, format!("csrf-token={}", csrf.secret))
        .header("x-csrf-token", "forged")
        .body(Body::from(hero_content().to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_responses_issue_the_csrf_pair(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/health").await;
    assert!(response.headers().get("x-csrf-token").is_some());
    let cookie = response
        .headers()
        .get("set-cookie")
        .expect("fresh GET must set the csrf cookie")
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("csrf-token="));
    assert!(cookie.contains("HttpOnly"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn public_submissions_do_not_need_csrf(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::post_json(
        app,
        "/api/v1/leads",
        serde_json::json!({
            "name": "Jane Visitor",
            "email": "jane@example.com",
            "message": "I would like to discuss a project."
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Content CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn content_create_and_public_read(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = editor_session(&pool, app.clone()).await;
    let csrf = csrf_pair(app.clone()).await;

    let response = post_json_admin(app.clone(), "/api/v1/admin/content", hero_content(), &token, &csrf).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["key"], "home.hero.title");
    assert_eq!(json["data"]["type"], "TEXT");
    assert_eq!(json["data"]["translations"].as_array().unwrap().len(), 2);

    // Locales are normalized to upper case on write.
    let locales: Vec<&str> = json["data"]["translations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["locale"].as_str().unwrap())
        .collect();
    assert!(locales.contains(&"EN") && locales.contains(&"FR"));

    // Public read with a locale filter returns only that translation.
    let response = get(app.clone(), "/api/v1/content/home.hero.title?locale=fr").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let translations = json["data"]["translations"].as_array().unwrap();
    assert_eq!(translations.len(), 1);
    assert_eq!(translations[0]["locale"], "FR");
    assert_eq!(translations[0]["value"], "Bienvenue");

    // Without a filter every translation comes back.
    let response = get(app, "/api/v1/content/home.hero.title").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["translations"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn content_rejects_bad_creation_payloads(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = editor_session(&pool, app.clone()).await;
    let csrf = csrf_pair(app.clone()).await;

    // Empty translation set.
    let response = post_json_admin(
        app.clone(),
        "/api/v1/admin/content",
        serde_json::json!({ "key": "a.key", "type": "TEXT", "translations": [] }),
        &token,
        &csrf,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Duplicate locale after normalization.
    let response = post_json_admin(
        app.clone(),
        "/api/v1/admin/content",
        serde_json::json!({ "key": "a.key", "type": "TEXT", "translations": [
            { "locale": "en", "value": "one" },
            { "locale": "EN", "value": "two" }
        ]}),
        &token,
        &csrf,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Duplicate key.
    let created = post_json_admin(app.clone(), "/api/v1/admin/content", hero_content(), &token, &csrf).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let response = post_json_admin(app, "/api/v1/admin/content", hero_content(), &token, &csrf).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn content_update_replaces_the_translation_set(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = editor_session(&pool, app.clone()).await;
    let csrf = csrf_pair(app.clone()).await;

    post_json_admin(app.clone(), "/api/v1/admin/content", hero_content(), &token, &csrf).await;

    let response = put_json_admin(
        app.clone(),
        "/api/v1/admin/content/home.hero.title",
        serde_json::json!({ "type": "RICH_TEXT", "translations": [
            { "locale": "de", "value": "Willkommen" }
        ]}),
        &token,
        &csrf,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["type"], "RICH_TEXT");
    let translations = json["data"]["translations"].as_array().unwrap();
    assert_eq!(translations.len(), 1);
    assert_eq!(translations[0]["locale"], "DE");

    // Updating a missing key is a 404.
    let response = put_json_admin(
        app,
        "/api/v1/admin/content/no.such.key",
        serde_json::json!({ "type": "TEXT" }),
        &token,
        &csrf,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn content_delete_cascades_to_translations(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = editor_session(&pool, app.clone()).await;
    let csrf = csrf_pair(app.clone()).await;

    post_json_admin(app.clone(), "/api/v1/admin/content", hero_content(), &token, &csrf).await;

    let response = delete_admin(
        app.clone(),
        "/api/v1/admin/content/home.hero.title",
        &token,
        &csrf,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, "/api/v1/content/home.hero.title").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn content_listing_paginates_by_key(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = editor_session(&pool, app.clone()).await;
    let csrf = csrf_pair(app.clone()).await;

    for key in ["a.first", "b.second", "c.third"] {
        let response = post_json_admin(
            app.clone(),
            "/api/v1/admin/content",
            serde_json::json!({ "key": key, "type": "TEXT", "translations": [
                { "locale": "en", "value": "value" }
            ]}),
            &token,
            &csrf,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(app, "/api/v1/content?page=1&limit=2").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"][0]["key"], "a.first");
    assert_eq!(json["meta"]["total"], 3);
    assert_eq!(json["meta"]["totalPages"], 2);
}
