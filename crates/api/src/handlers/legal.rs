//! Handlers for legal pages (privacy policy, terms, imprint).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use vitrine_core::error::CoreError;
use vitrine_db::models::legal_page::{CreateLegalPage, LegalPageResponse, UpdateLegalPage};
use vitrine_db::repositories::LegalPageRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::{LocaleParams, PaginationParams};
use crate::response::{DataResponse, PageMeta, PaginatedResponse};
use crate::state::AppState;

use super::normalize_locales;

const CACHE_PREFIX: &str = "cache:/api/v1/legal";

/// GET /api/v1/legal
pub async fn list_public(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PaginatedResponse<LegalPageResponse>>> {
    let (page, limit, offset) = params.resolve();
    let items = LegalPageRepo::list(&state.pool, limit, offset).await?;
    let total = LegalPageRepo::count(&state.pool).await?;
    Ok(Json(PaginatedResponse {
        data: items
            .into_iter()
            .map(|(parent, translations)| LegalPageResponse::from_parts(parent, translations))
            .collect(),
        meta: PageMeta::new(page, limit, total),
    }))
}

/// GET /api/v1/legal/{slug}
pub async fn get_public(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(locale): Query<LocaleParams>,
) -> AppResult<Json<DataResponse<LegalPageResponse>>> {
    let locale = locale.normalized();
    let (parent, translations) = LegalPageRepo::find_by_slug(&state.pool, &slug, locale.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Legal page",
        }))?;
    Ok(Json(DataResponse {
        data: LegalPageResponse::from_parts(parent, translations),
    }))
}

/// POST /api/v1/admin/legal
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Json(mut input): Json<CreateLegalPage>,
) -> AppResult<(StatusCode, Json<DataResponse<LegalPageResponse>>)> {
    let slug = input.slug.trim().to_lowercase();
    if slug.is_empty() {
        return Err(AppError::Core(CoreError::validation("slug is required")));
    }
    if input.translations.is_empty() {
        return Err(AppError::Core(CoreError::validation(
            "At least one translation is required",
        )));
    }
    normalize_locales(input.translations.iter_mut().map(|t| &mut t.locale))?;

    if LegalPageRepo::exists(&state.pool, &slug).await? {
        return Err(AppError::Core(CoreError::validation(format!(
            "Legal page with slug '{slug}' already exists"
        ))));
    }

    input.slug = slug;
    let (parent, translations) = LegalPageRepo::create(&state.pool, &input).await?;
    state.cache.invalidate_prefix(CACHE_PREFIX).await;

    tracing::info!(slug = %parent.slug, "Legal page created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: LegalPageResponse::from_parts(parent, translations),
        }),
    ))
}

/// PUT /api/v1/admin/legal/{slug}
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(slug): Path<String>,
    Json(mut input): Json<UpdateLegalPage>,
) -> AppResult<Json<DataResponse<LegalPageResponse>>> {
    if let Some(translations) = &mut input.translations {
        if translations.is_empty() {
            return Err(AppError::Core(CoreError::validation(
                "At least one translation is required",
            )));
        }
        normalize_locales(translations.iter_mut().map(|t| &mut t.locale))?;
    }

    let (parent, translations) = LegalPageRepo::update(&state.pool, &slug, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Legal page",
        }))?;
    state.cache.invalidate_prefix(CACHE_PREFIX).await;

    Ok(Json(DataResponse {
        data: LegalPageResponse::from_parts(parent, translations),
    }))
}

/// DELETE /api/v1/admin/legal/{slug}
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    let deleted = LegalPageRepo::delete(&state.pool, &slug).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Legal page",
        }));
    }
    state.cache.invalidate_prefix(CACHE_PREFIX).await;
    tracing::info!(%slug, "Legal page deleted");
    Ok(StatusCode::NO_CONTENT)
}
