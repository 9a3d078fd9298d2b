//! Cookie-consent recording and admin history.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use vitrine_core::types::DbId;
use vitrine_db::models::consent::{CookieConsent, RecordConsent};
use vitrine_db::repositories::ConsentRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PageMeta, PaginatedResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordConsentRequest {
    pub user_id: Option<DbId>,
    pub email: Option<String>,
    pub consent: bool,
}

#[derive(Debug, Deserialize)]
pub struct ConsentHistoryParams {
    pub email: Option<String>,
}

/// Best-effort client address from `X-Forwarded-For` (first hop).
fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers.get("x-forwarded-for")?.to_str().ok()?;
    let first = forwarded.split(',').next()?.trim();
    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}

/// POST /api/v1/consent
///
/// Appends a consent record; never updates in place so the audit trail
/// keeps every decision the visitor made.
pub async fn record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RecordConsentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CookieConsent>>)> {
    let ip_address = forwarded_ip(&headers);
    let user_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let record = ConsentRepo::record(
        &state.pool,
        &RecordConsent {
            user_id: input.user_id,
            email: input.email.map(|e| e.trim().to_lowercase()),
            consent: input.consent,
            ip_address,
            user_agent,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// GET /api/v1/admin/consent
///
/// With `?email=` returns the full history for that address (newest
/// first); otherwise a paginated listing of all records.
pub async fn history(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(filter): Query<ConsentHistoryParams>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<PaginatedResponse<CookieConsent>>> {
    if let Some(email) = filter.email.as_deref() {
        let email = email.trim().to_lowercase();
        let records = ConsentRepo::list_by_email(&state.pool, &email).await?;
        let total = records.len() as i64;
        let limit = total.max(1);
        return Ok(Json(PaginatedResponse {
            data: records,
            meta: PageMeta::new(1, limit, total),
        }));
    }

    let (page, limit, offset) = pagination.resolve();
    let records = ConsentRepo::list(&state.pool, limit, offset).await?;
    let total = ConsentRepo::count(&state.pool).await?;
    Ok(Json(PaginatedResponse {
        data: records,
        meta: PageMeta::new(page, limit, total),
    }))
}
