//! Handlers for testimonials (translatable, ordered, activatable).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::testimonial::{CreateTestimonial, TestimonialResponse, UpdateTestimonial};
use vitrine_db::repositories::TestimonialRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::{LocaleParams, PaginationParams};
use crate::response::{DataResponse, PageMeta, PaginatedResponse};
use crate::state::AppState;

use super::normalize_locales;

const CACHE_PREFIX: &str = "cache:/api/v1/testimonials";

/// Request body for `PATCH /admin/testimonials/{id}/order`.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    pub order: i32,
}

/// GET /api/v1/testimonials
///
/// Active testimonials only, in display order.
pub async fn list_public(
    State(state): State<AppState>,
    Query(locale): Query<LocaleParams>,
) -> AppResult<Json<DataResponse<Vec<TestimonialResponse>>>> {
    let locale = locale.normalized();
    let items = TestimonialRepo::list_active(&state.pool, locale.as_deref()).await?;
    Ok(Json(DataResponse {
        data: items
            .into_iter()
            .map(|(parent, translations)| TestimonialResponse::from_parts(parent, translations))
            .collect(),
    }))
}

/// GET /api/v1/admin/testimonials
pub async fn list(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PaginatedResponse<TestimonialResponse>>> {
    let (page, limit, offset) = params.resolve();
    let items = TestimonialRepo::list(&state.pool, limit, offset).await?;
    let total = TestimonialRepo::count(&state.pool).await?;
    Ok(Json(PaginatedResponse {
        data: items
            .into_iter()
            .map(|(parent, translations)| TestimonialResponse::from_parts(parent, translations))
            .collect(),
        meta: PageMeta::new(page, limit, total),
    }))
}

/// GET /api/v1/admin/testimonials/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TestimonialResponse>>> {
    let (parent, translations) = TestimonialRepo::find_by_id(&state.pool, id, None)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Testimonial",
        }))?;
    Ok(Json(DataResponse {
        data: TestimonialResponse::from_parts(parent, translations),
    }))
}

/// POST /api/v1/admin/testimonials
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Json(mut input): Json<CreateTestimonial>,
) -> AppResult<(StatusCode, Json<DataResponse<TestimonialResponse>>)> {
    if input.translations.is_empty() {
        return Err(AppError::Core(CoreError::validation(
            "At least one translation is required",
        )));
    }
    normalize_locales(input.translations.iter_mut().map(|t| &mut t.locale))?;

    let (parent, translations) = TestimonialRepo::create(&state.pool, &input).await?;
    state.cache.invalidate_prefix(CACHE_PREFIX).await;

    tracing::info!(testimonial_id = parent.id, "Testimonial created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: TestimonialResponse::from_parts(parent, translations),
        }),
    ))
}

/// PUT /api/v1/admin/testimonials/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateTestimonial>,
) -> AppResult<Json<DataResponse<TestimonialResponse>>> {
    if let Some(translations) = &mut input.translations {
        if translations.is_empty() {
            return Err(AppError::Core(CoreError::validation(
                "At least one translation is required",
            )));
        }
        normalize_locales(translations.iter_mut().map(|t| &mut t.locale))?;
    }

    let (parent, translations) = TestimonialRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Testimonial",
        }))?;
    state.cache.invalidate_prefix(CACHE_PREFIX).await;

    Ok(Json(DataResponse {
        data: TestimonialResponse::from_parts(parent, translations),
    }))
}

/// PATCH /api/v1/admin/testimonials/{id}/order
pub async fn update_order(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOrderRequest>,
) -> AppResult<StatusCode> {
    TestimonialRepo::update_order(&state.pool, id, input.order)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Testimonial",
        }))?;
    state.cache.invalidate_prefix(CACHE_PREFIX).await;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/testimonials/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TestimonialRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Testimonial",
        }));
    }
    state.cache.invalidate_prefix(CACHE_PREFIX).await;
    tracing::info!(testimonial_id = id, "Testimonial deleted");
    Ok(StatusCode::NO_CONTENT)
}
