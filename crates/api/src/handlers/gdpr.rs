//! GDPR data export and erasure for the authenticated user.

use axum::extract::State;
use axum::Json;
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::Serialize;
use vitrine_core::error::CoreError;
use vitrine_core::types::Timestamp;
use vitrine_db::models::lead::Lead;
use vitrine_db::models::meeting::Meeting;
use vitrine_db::models::user::UserResponse;
use vitrine_db::repositories::{ConsentRepo, LeadRepo, MeetingRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::auth::clear_auth_cookies;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GdprExport {
    pub user: UserResponse,
    pub leads: Vec<Lead>,
    pub meetings: Vec<Meeting>,
    pub exported_at: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct ErasureResponse {
    pub message: String,
}

/// GET /api/v1/gdpr/export
///
/// Collects everything stored under the caller's email address.
pub async fn export(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<GdprExport>>> {
    let account = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User" }))?;

    let leads = LeadRepo::list_by_email(&state.pool, &user.email).await?;
    let meetings = MeetingRepo::list_by_email(&state.pool, &user.email).await?;

    Ok(Json(DataResponse {
        data: GdprExport {
            user: account.into(),
            leads,
            meetings,
            exported_at: Utc::now(),
        },
    }))
}

/// DELETE /api/v1/gdpr/delete
///
/// Erases the caller's personal data: leads and meetings are deleted,
/// consent records and the account row are anonymized in place. The
/// session cookies are cleared since the account can no longer log in.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<(CookieJar, Json<ErasureResponse>)> {
    let leads = LeadRepo::delete_by_email(&state.pool, &user.email).await?;
    let meetings = MeetingRepo::delete_by_email(&state.pool, &user.email).await?;
    let consents = ConsentRepo::anonymize_by_email(&state.pool, &user.email).await?;
    UserRepo::anonymize(&state.pool, user.user_id).await?;

    tracing::info!(
        user_id = user.user_id,
        leads,
        meetings,
        consents,
        "GDPR erasure completed"
    );

    let jar = clear_auth_cookies(CookieJar::new());
    Ok((
        jar,
        Json(ErasureResponse {
            message: "Your personal data has been deleted".to_string(),
        }),
    ))
}
