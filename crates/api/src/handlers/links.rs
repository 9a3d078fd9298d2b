//! Handlers for social and external links.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::link::{
    CreateExternalLink, CreateSocialLink, ExternalLink, SocialLink, UpdateExternalLink,
    UpdateSocialLink,
};
use vitrine_db::repositories::LinkRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

const CACHE_PREFIX: &str = "cache:/api/v1/links";

// ---------------------------------------------------------------------------
// Social links
// ---------------------------------------------------------------------------

/// GET /api/v1/links/social
pub async fn list_social_public(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SocialLink>>>> {
    let links = LinkRepo::list_active_social(&state.pool).await?;
    Ok(Json(DataResponse { data: links }))
}

/// GET /api/v1/admin/links/social
pub async fn list_social(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
) -> AppResult<Json<DataResponse<Vec<SocialLink>>>> {
    let links = LinkRepo::list_social(&state.pool).await?;
    Ok(Json(DataResponse { data: links }))
}

/// POST /api/v1/admin/links/social
pub async fn create_social(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Json(input): Json<CreateSocialLink>,
) -> AppResult<(StatusCode, Json<DataResponse<SocialLink>>)> {
    let link = LinkRepo::create_social(&state.pool, &input).await?;
    state.cache.invalidate_prefix(CACHE_PREFIX).await;
    Ok((StatusCode::CREATED, Json(DataResponse { data: link })))
}

/// PUT /api/v1/admin/links/social/{id}
pub async fn update_social(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSocialLink>,
) -> AppResult<Json<DataResponse<SocialLink>>> {
    let link = LinkRepo::update_social(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Social link",
        }))?;
    state.cache.invalidate_prefix(CACHE_PREFIX).await;
    Ok(Json(DataResponse { data: link }))
}

/// DELETE /api/v1/admin/links/social/{id}
pub async fn delete_social(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = LinkRepo::delete_social(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Social link",
        }));
    }
    state.cache.invalidate_prefix(CACHE_PREFIX).await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// External links
// ---------------------------------------------------------------------------

/// GET /api/v1/links/external
pub async fn list_external_public(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ExternalLink>>>> {
    let links = LinkRepo::list_active_external(&state.pool).await?;
    Ok(Json(DataResponse { data: links }))
}

/// GET /api/v1/admin/links/external
pub async fn list_external(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
) -> AppResult<Json<DataResponse<Vec<ExternalLink>>>> {
    let links = LinkRepo::list_external(&state.pool).await?;
    Ok(Json(DataResponse { data: links }))
}

/// POST /api/v1/admin/links/external
pub async fn create_external(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Json(input): Json<CreateExternalLink>,
) -> AppResult<(StatusCode, Json<DataResponse<ExternalLink>>)> {
    let link = LinkRepo::create_external(&state.pool, &input).await?;
    state.cache.invalidate_prefix(CACHE_PREFIX).await;
    Ok((StatusCode::CREATED, Json(DataResponse { data: link })))
}

/// PUT /api/v1/admin/links/external/{id}
pub async fn update_external(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateExternalLink>,
) -> AppResult<Json<DataResponse<ExternalLink>>> {
    let link = LinkRepo::update_external(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "External link",
        }))?;
    state.cache.invalidate_prefix(CACHE_PREFIX).await;
    Ok(Json(DataResponse { data: link }))
}

/// DELETE /api/v1/admin/links/external/{id}
pub async fn delete_external(
    State(state): State<AppState>,
    RequireEditor(_editor): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = LinkRepo::delete_external(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "External link",
        }));
    }
    state.cache.invalidate_prefix(CACHE_PREFIX).await;
    Ok(StatusCode::NO_CONTENT)
}
