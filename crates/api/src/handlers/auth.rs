//! Handlers for the `/auth` resource (login, refresh, me, logout,
//! change-password).
//!
//! Tokens are delivered two ways at once: in the JSON body for API clients
//! and as httpOnly cookies for the admin SPA. Login failures use the same
//! message for unknown email and wrong password so the endpoint does not
//! leak which emails exist.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use vitrine_core::error::CoreError;
use vitrine_db::models::user::{User, UserResponse};
use vitrine_db::repositories::UserRepo;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, validate_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, ACCESS_COOKIE, REFRESH_COOKIE};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh` (cookie fallback applies).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Cookie helpers
// ---------------------------------------------------------------------------

fn token_cookie(
    name: &'static str,
    value: &str,
    days: i64,
    config: &ServerConfig,
) -> Cookie<'static> {
    Cookie::build((name, value.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(time::Duration::days(days))
        .build()
}

fn set_auth_cookies(jar: CookieJar, access: &str, refresh: &str, config: &ServerConfig) -> CookieJar {
    jar.add(token_cookie(
        ACCESS_COOKIE,
        access,
        config.jwt.access_token_expiry_days,
        config,
    ))
    .add(token_cookie(
        REFRESH_COOKIE,
        refresh,
        config.jwt.refresh_token_expiry_days,
        config,
    ))
}

pub(crate) fn clear_auth_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_COOKIE).path("/").build())
        .remove(Cookie::build(REFRESH_COOKIE).path("/").build())
}

fn build_auth_response(user: User, config: &ServerConfig) -> AppResult<AuthResponse> {
    let role = user.role.as_str();
    let access = generate_access_token(user.id, &user.email, role, &config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    let refresh = generate_refresh_token(user.id, &user.email, role, &config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    Ok(AuthResponse {
        access_token: access,
        refresh_token: refresh,
        expires_in: config.jwt.access_token_expiry_days * 24 * 60 * 60,
        user: UserResponse::from(user),
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns both tokens and sets the
/// auth cookies.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    // Anonymized accounts keep their row but carry an empty hash.
    if user.password_hash.is_empty() {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    UserRepo::record_login(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, "User logged in");

    let response = build_auth_response(user, &state.config)?;
    let jar = set_auth_cookies(
        jar,
        &response.access_token,
        &response.refresh_token,
        &state.config,
    );
    Ok((jar, Json(response)))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token (body or cookie) for a new token pair. The user
/// row is re-read so a deleted or anonymized account cannot refresh.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<RefreshRequest>>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    let token = body
        .map(|Json(b)| b.refresh_token)
        .or_else(|| jar.get(REFRESH_COOKIE).map(|c| c.value().to_string()))
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Refresh token required".into())))?;

    let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    })?;

    let user = UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let response = build_auth_response(user, &state.config)?;
    let jar = set_auth_cookies(
        jar,
        &response.access_token,
        &response.refresh_token,
        &state.config,
    );
    Ok((jar, Json(response)))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User" }))?;
    Ok(Json(UserResponse::from(user)))
}

/// POST /api/v1/auth/logout
///
/// Stateless logout: clears the auth cookies. Tokens already issued expire
/// on their own.
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (clear_auth_cookies(jar), StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let row = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User" }))?;

    if row.password_hash.is_empty() {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    let current_valid = verify_password(&input.current_password, &row.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::validation(msg)))?;

    let hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    UserRepo::update_password(&state.pool, row.id, &hash).await?;

    tracing::info!(user_id = row.id, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}
