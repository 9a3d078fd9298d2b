//! HTTP-level integration tests for authentication, RBAC, and the auth
//! rate budget.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, get, get_auth, login_token, post_json, post_json_auth,
};
use sqlx::PgPool;
use vitrine_db::models::user::UserRole;

#[sqlx::test(migrations = "../db/migrations")]
async fn login_success_returns_tokens_and_cookies(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "admin@test.com", UserRole::Admin).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "admin@test.com", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookies: Vec<String> = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert!(
        cookies.iter().any(|c| c.starts_with("access_token=")),
        "login must set the access_token cookie"
    );
    assert!(
        cookies.iter().any(|c| c.starts_with("refresh_token=")),
        "login must set the refresh_token cookie"
    );

    let json = body_json(response).await;
    assert!(json["accessToken"].is_string());
    assert!(json["refreshToken"].is_string());
    assert!(json["expiresIn"].is_number());
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["email"], "admin@test.com");
    assert_eq!(json["user"]["role"], "ADMIN");
    assert!(
        json["user"].get("passwordHash").is_none() && json["user"].get("password_hash").is_none(),
        "user payload must not leak the password hash"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_failures_use_the_same_message(pool: PgPool) {
    let (_user, _password) = create_test_user(&pool, "admin@test.com", UserRole::Admin).await;
    let app = common::build_test_app(pool);

    let wrong_password = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "admin@test.com", "password": "nope" }),
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = body_json(wrong_password).await;

    let unknown_email = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": "ghost@test.com", "password": "nope" }),
    )
    .await;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email = body_json(unknown_email).await;

    // Neither response may reveal whether the email exists.
    assert_eq!(
        wrong_password["error"]["message"],
        unknown_email["error"]["message"]
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_returns_a_new_token_pair(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "admin@test.com", UserRole::Admin).await;
    let app = common::build_test_app(pool);

    let login = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "admin@test.com", "password": password }),
    )
    .await;
    let login = body_json(login).await;
    let refresh_token = login["refreshToken"].as_str().unwrap();

    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refreshToken": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["accessToken"].is_string());
    assert!(json["refreshToken"].is_string());
    assert_eq!(json["user"]["email"], "admin@test.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_rejects_invalid_tokens(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refreshToken": "not-a-jwt" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_returns_the_current_user(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "admin@test.com", UserRole::Admin).await;
    let app = common::build_test_app(pool);

    let token = login_token(app.clone(), "admin@test.com", &password).await;
    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], user.id);
    assert_eq!(json["email"], "admin@test.com");
    assert!(json["lastLoginAt"].is_string(), "login must stamp lastLoginAt");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn protected_routes_require_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);

    let me = get(app.clone(), "/api/v1/auth/me").await;
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);

    let leads = get(app, "/api/v1/admin/leads").await;
    assert_eq!(leads.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn editors_cannot_reach_admin_only_resources(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "editor@test.com", UserRole::Editor).await;
    let app = common::build_test_app(pool);

    let token = login_token(app.clone(), "editor@test.com", &password).await;
    let response = get_auth(app, "/api/v1/admin/leads", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn change_password_rotates_the_credential(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "admin@test.com", UserRole::Admin).await;
    let app = common::build_test_app(pool);

    let token = login_token(app.clone(), "admin@test.com", &password).await;

    // Wrong current password is rejected.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/auth/change-password",
        serde_json::json!({ "currentPassword": "wrong", "newPassword": "brand_new_pw_1" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Too-weak replacement is rejected.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/auth/change-password",
        serde_json::json!({ "currentPassword": password, "newPassword": "short" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/auth/change-password",
        serde_json::json!({ "currentPassword": password, "newPassword": "brand_new_pw_1" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Old password no longer works, new one does.
    let old = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "admin@test.com", "password": password }),
    )
    .await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);

    login_token(app, "admin@test.com", "brand_new_pw_1").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_clears_the_auth_cookies(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/auth/logout", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let cookies: Vec<String> = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("access_token=")));
    assert!(cookies.iter().any(|c| c.starts_with("refresh_token=")));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn auth_endpoints_are_rate_limited(pool: PgPool) {
    let app = common::build_test_app(pool);

    // The auth budget allows 10 requests per window for one client.
    let body = serde_json::json!({ "email": "ghost@test.com", "password": "nope" });
    for _ in 0..10 {
        let response = post_json(app.clone(), "/api/v1/auth/login", body.clone()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "RATE_LIMITED");
}
