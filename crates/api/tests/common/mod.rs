//! Shared helpers for HTTP-level integration tests.
//!
//! [`build_test_app`] mirrors the production router construction in
//! `router.rs` so tests exercise the same middleware stack (CORS, request
//! ID, CSRF, rate limiting, timeout, panic recovery) that production uses.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use vitrine_api::auth::jwt::JwtConfig;
use vitrine_api::auth::password::hash_password;
use vitrine_api::cache::Cache;
use vitrine_api::config::ServerConfig;
use vitrine_api::middleware::rate_limit::RateLimiter;
use vitrine_api::router::build_app_router;
use vitrine_api::state::AppState;
use vitrine_db::models::user::{CreateUser, User, UserRole};
use vitrine_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        cookie_secure: false,
        jwt: JwtConfig {
            secret: "integration-test-secret-do-not-use".to_string(),
            access_token_expiry_days: 7,
            refresh_token_expiry_days: 30,
        },
    }
}

/// Build the full application router against the given database pool.
///
/// The mailer is disabled and the response cache is off, so handlers hit
/// the database directly and no emails leave the process.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer: None,
        cache: Cache::Disabled,
        rate_limiter: Arc::new(RateLimiter::new()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

fn apply_bearer(builder: axum::http::request::Builder, token: Option<&str>) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should not fail")
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = apply_bearer(Request::builder().method(Method::GET).uri(uri), Some(token))
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
    csrf: Option<&CsrfPair>,
) -> Response {
    let mut builder = apply_bearer(Request::builder().method(method).uri(uri), token)
        .header(CONTENT_TYPE, "application/json");
    if let Some(pair) = csrf {
        builder = builder
            .header(COOKIE, format!("csrf-token={}", pair.secret))
            .header("x-csrf-token", pair.token.clone());
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("request should build");
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::POST, uri, body, None, None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    json_request(app, Method::POST, uri, body, Some(token), None).await
}

/// POST with auth and CSRF, for `/api/v1/admin` mutations.
pub async fn post_json_admin(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
    csrf: &CsrfPair,
) -> Response {
    json_request(app, Method::POST, uri, body, Some(token), Some(csrf)).await
}

pub async fn put_json_admin(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
    csrf: &CsrfPair,
) -> Response {
    json_request(app, Method::PUT, uri, body, Some(token), Some(csrf)).await
}

pub async fn patch_json_admin(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
    csrf: &CsrfPair,
) -> Response {
    json_request(app, Method::PATCH, uri, body, Some(token), Some(csrf)).await
}

pub async fn delete_admin(app: Router, uri: &str, token: &str, csrf: &CsrfPair) -> Response {
    let request = apply_bearer(Request::builder().method(Method::DELETE).uri(uri), Some(token))
        .header(COOKIE, format!("csrf-token={}", csrf.secret))
        .header("x-csrf-token", csrf.token.clone())
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = apply_bearer(Request::builder().method(Method::DELETE).uri(uri), Some(token))
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Auth and CSRF helpers
// ---------------------------------------------------------------------------

/// The double-submit pair: cookie secret plus derived header token.
pub struct CsrfPair {
    pub secret: String,
    pub token: String,
}

/// Obtain a CSRF pair the way a browser would: any GET response issues the
/// cookie and the derived token header.
pub async fn csrf_pair(app: Router) -> CsrfPair {
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let token = response
        .headers()
        .get("x-csrf-token")
        .expect("GET responses must carry the CSRF token header")
        .to_str()
        .expect("token should be ascii")
        .to_string();

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("fresh GET must set the CSRF cookie")
        .to_str()
        .expect("cookie should be ascii");
    let secret = set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("csrf-token="))
        .expect("set-cookie must hold csrf-token")
        .to_string();

    CsrfPair { secret, token }
}

/// Create a user directly in the database and return the row plus the
/// plaintext password used.
pub async fn create_test_user(pool: &PgPool, email: &str, role: UserRole) -> (User, String) {
    let password = "test_password_123";
    let hashed = hash_password(password).expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: hashed,
            role,
        },
    )
    .await
    .expect("user creation should succeed");
    (user, password.to_string())
}

/// Log in via the API and return the access token.
pub async fn login_token(app: Router, email: &str, password: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["accessToken"]
        .as_str()
        .expect("login response must contain accessToken")
        .to_string()
}
