//! Stamps the request correlation id into JSON error bodies.
//!
//! [`AppError`](crate::error::AppError) cannot see the request when it
//! serializes, so `requestId` is added here: the middleware reads the
//! `x-request-id` header set upstream, and on a 4xx/5xx JSON response with
//! the project's `{"error": {...}}` envelope it rewrites the body to include
//! the id. Non-error and non-JSON responses pass through untouched.

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::middleware::Next;
use axum::response::Response;
use http_body_util::BodyExt;

pub async fn stamp_error_request_id(req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let response = next.run(req).await;

    let Some(request_id) = request_id else {
        return response;
    };
    if !response.status().is_client_error() && !response.status().is_server_error() {
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

    let (mut parts, body) = response.into_parts();
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to buffer error response body");
            return Response::from_parts(parts, Body::empty());
        }
    };

    let stamped = match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(mut value) => {
            if let Some(error) = value.get_mut("error").and_then(|e| e.as_object_mut()) {
                error.insert(
                    "requestId".to_string(),
                    serde_json::Value::String(request_id),
                );
            }
            serde_json::to_vec(&value).unwrap_or_else(|_| bytes.to_vec())
        }
        Err(_) => bytes.to_vec(),
    };

    // The body length changed; let the server recompute it.
    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(stamped))
}
