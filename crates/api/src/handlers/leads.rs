//! Handlers for the contact/lead pipeline.
//!
//! The public submission endpoint validates fields and returns a per-field
//! `details` map on failure. Admin endpoints cover triage (list, status
//! updates) and a CSV export of the full pipeline.

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_core::{csv, locale};
use vitrine_db::models::lead::{CreateLead, Lead, UpdateLead};
use vitrine_db::repositories::LeadRepo;

use crate::email;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PageMeta, PaginatedResponse};
use crate::state::AppState;

/// Default source recorded when the submission does not name one.
const DEFAULT_SOURCE: &str = "contact_form";

/// Request body for the public `POST /leads`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
    pub source: Option<String>,
    pub locale: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// POST /api/v1/leads (public, rate-limited)
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateLeadRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Lead>>)> {
    input.validate()?;

    let lead = LeadRepo::create(
        &state.pool,
        &CreateLead {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: input.phone,
            message: input.message,
            source: input.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            locale: input
                .locale
                .as_deref()
                .map(locale::normalize)
                .unwrap_or_else(|| locale::DEFAULT_LOCALE.to_string()),
            metadata: input.metadata,
        },
    )
    .await?;

    tracing::info!(lead_id = lead.id, "Lead submitted");
    email::notify_lead(&state, lead.clone());

    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}

/// GET /api/v1/admin/leads
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PaginatedResponse<Lead>>> {
    let (page, limit, offset) = params.resolve();
    let leads = LeadRepo::list(&state.pool, limit, offset).await?;
    let total = LeadRepo::count(&state.pool).await?;
    Ok(Json(PaginatedResponse {
        data: leads,
        meta: PageMeta::new(page, limit, total),
    }))
}

/// GET /api/v1/admin/leads/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Lead>>> {
    let lead = LeadRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lead" }))?;
    Ok(Json(DataResponse { data: lead }))
}

/// PATCH /api/v1/admin/leads/{id}
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLead>,
) -> AppResult<Json<DataResponse<Lead>>> {
    let lead = LeadRepo::update_status(&state.pool, id, input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lead" }))?;
    tracing::info!(lead_id = id, status = lead.status.as_str(), "Lead status updated");
    Ok(Json(DataResponse { data: lead }))
}

/// DELETE /api/v1/admin/leads/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = LeadRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Lead" }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/leads/export
///
/// RFC-4180 CSV of the whole pipeline, newest first.
pub async fn export_csv(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<impl IntoResponse> {
    let leads = LeadRepo::list_all(&state.pool).await?;

    let headers = [
        "id", "name", "email", "phone", "message", "source", "status", "locale", "createdAt",
    ];
    let rows: Vec<Vec<String>> = leads
        .iter()
        .map(|lead| {
            vec![
                lead.id.to_string(),
                lead.name.clone(),
                lead.email.clone(),
                lead.phone.clone().unwrap_or_default(),
                lead.message.clone(),
                lead.source.clone(),
                lead.status.as_str().to_string(),
                lead.locale.clone(),
                lead.created_at.to_rfc3339(),
            ]
        })
        .collect();

    let body = csv::encode(&headers, &rows);

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8"),
            (CONTENT_DISPOSITION, "attachment; filename=\"leads.csv\""),
        ],
        body,
    ))
}
