//! Double-submit CSRF protection.
//!
//! GET responses carry an httpOnly `csrf-token` cookie (random secret) and an
//! `X-CSRF-Token` header with the derived token. Mutating requests under the
//! admin prefix must echo the derived token; everything else (login, public
//! lead/meeting/consent submission) passes through untouched.

use axum::extract::{Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use vitrine_core::error::CoreError;

use crate::auth::csrf;
use crate::error::AppError;
use crate::state::AppState;

/// Cookie holding the random CSRF secret.
pub const CSRF_COOKIE: &str = "csrf-token";
/// Header carrying the derived token in both directions.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Path prefix whose mutations require a valid CSRF token.
const ADMIN_PREFIX: &str = "/api/v1/admin";

pub async fn csrf_protect(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let method = req.method().clone();
    let mutating = matches!(
        method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    );

    if mutating && req.uri().path().starts_with(ADMIN_PREFIX) {
        let secret = jar
            .get(CSRF_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or_else(|| AppError::Core(CoreError::Forbidden("CSRF token missing".into())))?;

        let presented = req
            .headers()
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Core(CoreError::Forbidden("CSRF token missing".into())))?;

        if !csrf::verify(&state.config.jwt.secret, &secret, presented) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Invalid CSRF token".into(),
            )));
        }
    }

    if method == Method::GET {
        let (secret, fresh) = match jar.get(CSRF_COOKIE) {
            Some(cookie) => (cookie.value().to_string(), false),
            None => (csrf::random_hex(csrf::SECRET_BYTES), true),
        };
        let token = csrf::derive_token(&state.config.jwt.secret, &secret);

        let mut response = next.run(req).await;

        if let Ok(value) = HeaderValue::from_str(&token) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(CSRF_HEADER), value);
        }
        if fresh {
            let cookie = Cookie::build((CSRF_COOKIE, secret))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(state.config.cookie_secure)
                .build();
            if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }
        return Ok(response);
    }

    Ok(next.run(req).await)
}
