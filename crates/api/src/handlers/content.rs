//! Handlers for translatable content blocks.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use vitrine_core::error::CoreError;
use vitrine_db::models::content::{ContentResponse, CreateContent, UpdateContent};
use vitrine_db::repositories::ContentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::{LocaleParams, PaginationParams};
use crate::response::{DataResponse, PageMeta, PaginatedResponse};
use crate::state::AppState;

use super::normalize_locales;

/// Prefix invalidated in the response cache after admin mutations.
const CACHE_PREFIX: &str = "cache:/api/v1/content";

/// GET /api/v1/content
pub async fn list_public(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
    Query(locale): Query<LocaleParams>,
) -> AppResult<Json<PaginatedResponse<ContentResponse>>> {
    let (page, limit, offset) = pagination.resolve();
    let locale = locale.normalized();

    let items = ContentRepo::list(&state.pool, locale.as_deref(), limit, offset).await?;
    let total = ContentRepo::count(&state.pool).await?;

    Ok(Json(PaginatedResponse {
        data: items
            .into_iter()
            .map(|(parent, translations)| ContentResponse::from_parts(parent, translations))
            .collect(),
        meta: PageMeta::new(page, limit, total),
    }))
}

/// GET /api/v1/content/{key}
pub async fn get_public(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(locale): Query<LocaleParams>,
) -> AppResult<Json<DataResponse<ContentResponse>>> {
    let locale = locale.normalized();
    let (parent, translations) = ContentRepo::find_by_key(&state.pool, &key, locale.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Content" }))?;
    Ok(Json(DataResponse {
        data: ContentResponse::from_parts(parent, translations),
    }))
}

/// POST /api/v1/admin/content
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Json(mut input): Json<CreateContent>,
) -> AppResult<(StatusCode, Json<DataResponse<ContentResponse>>)> {
    let key = input.key.trim().to_string();
    if key.is_empty() {
        return Err(AppError::Core(CoreError::validation("key is required")));
    }
    if input.translations.is_empty() {
        return Err(AppError::Core(CoreError::validation(
            "At least one translation is required",
        )));
    }
    normalize_locales(input.translations.iter_mut().map(|t| &mut t.locale))?;

    if ContentRepo::exists(&state.pool, &key).await? {
        return Err(AppError::Core(CoreError::validation(format!(
            "Content with key '{key}' already exists"
        ))));
    }

    input.key = key;
    let (parent, translations) = ContentRepo::create(&state.pool, &input).await?;
    state.cache.invalidate_prefix(CACHE_PREFIX).await;

    tracing::info!(key = %parent.key, "Content created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ContentResponse::from_parts(parent, translations),
        }),
    ))
}

/// PUT /api/v1/admin/content/{key}
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(key): Path<String>,
    Json(mut input): Json<UpdateContent>,
) -> AppResult<Json<DataResponse<ContentResponse>>> {
    if let Some(translations) = &mut input.translations {
        if translations.is_empty() {
            return Err(AppError::Core(CoreError::validation(
                "At least one translation is required",
            )));
        }
        normalize_locales(translations.iter_mut().map(|t| &mut t.locale))?;
    }

    let (parent, translations) = ContentRepo::update(&state.pool, &key, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Content" }))?;
    state.cache.invalidate_prefix(CACHE_PREFIX).await;

    Ok(Json(DataResponse {
        data: ContentResponse::from_parts(parent, translations),
    }))
}

/// DELETE /api/v1/admin/content/{key}
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(key): Path<String>,
) -> AppResult<StatusCode> {
    let deleted = ContentRepo::delete(&state.pool, &key).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Content" }));
    }
    state.cache.invalidate_prefix(CACHE_PREFIX).await;
    tracing::info!(%key, "Content deleted");
    Ok(StatusCode::NO_CONTENT)
}
