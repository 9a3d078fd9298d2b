//! Best-effort response cache for public GET routes.
//!
//! Successful JSON responses are stored under `cache:{path}?{query}` for a
//! short TTL. Anything that is not a cacheable hit (non-GET, cache disabled,
//! non-200, Redis failure) falls through to the handler. Admin mutations
//! invalidate by path prefix via [`crate::cache::Cache::invalidate_prefix`].

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http_body_util::BodyExt;

use crate::state::AppState;

/// How long public responses stay cached.
const CACHE_TTL_SECS: u64 = 60;

/// Build the cache key for a request path and optional query string.
pub fn cache_key(path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) => format!("cache:{path}?{q}"),
        None => format!("cache:{path}"),
    }
}

pub async fn cache_public_get(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    if req.method() != Method::GET || !state.cache.is_enabled() {
        return next.run(req).await;
    }

    let key = cache_key(req.uri().path(), req.uri().query());

    if let Some(cached) = state.cache.get(&key).await {
        tracing::debug!(key, "Response cache hit");
        let mut response = (
            StatusCode::OK,
            [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            cached,
        )
            .into_response();
        response
            .headers_mut()
            .insert("x-cache", HeaderValue::from_static("hit"));
        return response;
    }

    let response = next.run(req).await;
    if response.status() != StatusCode::OK {
        return response;
    }
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if !is_json {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to buffer response for caching");
            return Response::from_parts(parts, Body::empty());
        }
    };

    if let Ok(text) = std::str::from_utf8(&bytes) {
        state.cache.set(&key, text, CACHE_TTL_SECS).await;
    }

    Response::from_parts(parts, Body::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_includes_query() {
        assert_eq!(cache_key("/api/v1/content", None), "cache:/api/v1/content");
        assert_eq!(
            cache_key("/api/v1/content", Some("locale=EN")),
            "cache:/api/v1/content?locale=EN"
        );
    }
}
