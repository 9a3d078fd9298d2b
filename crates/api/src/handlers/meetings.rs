//! Handlers for the meeting scheduler: public slot lookup and booking,
//! admin meeting management, and the weekly availability configuration.
//!
//! Booking runs inside a transaction holding an advisory lock so two
//! concurrent requests for the same slot cannot both pass the conflict
//! check.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use vitrine_core::availability::{self, Booking, Slot};
use vitrine_core::error::CoreError;
use vitrine_core::locale;
use vitrine_core::types::{DbId, Timestamp};
use vitrine_db::models::availability::{AvailabilityWindow, WindowInput};
use vitrine_db::models::meeting::{CreateMeeting, Meeting, UpdateMeeting};
use vitrine_db::repositories::{AvailabilityRepo, MeetingRepo};

use crate::auth::csrf::random_hex;
use crate::email;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PageMeta, PaginatedResponse};
use crate::state::AppState;

/// Slot length offered to visitors, and the default meeting duration.
const DEFAULT_DURATION_MINS: i32 = 30;

/// Longest date range a single availability query may cover.
const MAX_RANGE_DAYS: i64 = 90;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query for `GET /meetings/availability`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// One bookable slot in the availability response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotResponse {
    pub date: NaiveDate,
    pub starts_at: Timestamp,
    pub available: bool,
}

impl From<Slot> for SlotResponse {
    fn from(slot: Slot) -> Self {
        SlotResponse {
            date: slot.date,
            starts_at: slot.starts_at,
            available: true,
        }
    }
}

/// Request body for the public `POST /meetings`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookMeetingRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    pub phone: Option<String>,
    pub scheduled_at: Timestamp,
    /// Minutes; defaults to one slot.
    pub duration: Option<i32>,
    pub timezone: Option<String>,
    pub locale: Option<String>,
    pub notes: Option<String>,
}

/// Request body for `PUT /admin/meetings/availability`.
#[derive(Debug, Deserialize)]
pub struct ReplaceAvailabilityRequest {
    pub windows: Vec<WindowInput>,
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/meetings/availability?startDate=&endDate=
pub async fn get_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<DataResponse<Vec<SlotResponse>>>> {
    if query.end_date < query.start_date {
        return Err(AppError::Core(CoreError::validation(
            "endDate must be on or after startDate",
        )));
    }
    if (query.end_date - query.start_date).num_days() > MAX_RANGE_DAYS {
        return Err(AppError::Core(CoreError::validation(format!(
            "Date range must not exceed {MAX_RANGE_DAYS} days"
        ))));
    }

    let window_rows = AvailabilityRepo::list_active(&state.pool).await?;
    let windows = window_rows
        .iter()
        .map(AvailabilityWindow::to_window)
        .collect::<Result<Vec<_>, _>>()?;

    let range_start = query
        .start_date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::InternalError("invalid date".into()))?
        .and_utc();
    let range_end = range_start + Duration::days((query.end_date - query.start_date).num_days() + 1);

    let booked = MeetingRepo::list_booked_between(&state.pool, range_start, range_end).await?;
    let bookings: Vec<Booking> = booked
        .iter()
        .map(|m| Booking {
            starts_at: m.scheduled_at,
            duration_mins: m.duration_mins,
        })
        .collect();

    let slots = availability::generate_slots(
        query.start_date,
        query.end_date,
        &windows,
        &bookings,
        Utc::now(),
    );

    Ok(Json(DataResponse {
        data: slots.into_iter().map(SlotResponse::from).collect(),
    }))
}

/// POST /api/v1/meetings (public, rate-limited)
///
/// Validates the requested slot against the weekly windows and existing
/// bookings, then inserts. The advisory lock serializes concurrent bookings;
/// both the conflict read and the insert happen inside the same transaction.
pub async fn book(
    State(state): State<AppState>,
    Json(input): Json<BookMeetingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Meeting>>)> {
    input.validate()?;

    let duration = input.duration.unwrap_or(DEFAULT_DURATION_MINS);
    if duration <= 0 || duration > 8 * 60 {
        return Err(AppError::Core(CoreError::validation(
            "duration must be between 1 and 480 minutes",
        )));
    }

    let start = input.scheduled_at;
    let end = start + Duration::minutes(duration as i64);

    let mut tx = state.pool.begin().await?;
    MeetingRepo::lock_for_booking(&mut tx).await?;

    let window_rows = AvailabilityRepo::list_active(&mut *tx).await?;
    let windows = window_rows
        .iter()
        .map(AvailabilityWindow::to_window)
        .collect::<Result<Vec<_>, _>>()?;

    let conflicting = MeetingRepo::find_conflicting(&mut tx, start, end).await?;
    let bookings: Vec<Booking> = conflicting
        .iter()
        .map(|m| Booking {
            starts_at: m.scheduled_at,
            duration_mins: m.duration_mins,
        })
        .collect();

    availability::validate_booking(start, duration, &windows, &bookings, Utc::now())?;

    let meeting = MeetingRepo::create(
        &mut tx,
        &CreateMeeting {
            email: input.email.trim().to_string(),
            name: input.name.trim().to_string(),
            phone: input.phone,
            scheduled_at: start,
            duration_mins: duration,
            timezone: input.timezone.unwrap_or_else(|| "UTC".to_string()),
            locale: input
                .locale
                .as_deref()
                .map(locale::normalize)
                .unwrap_or_else(|| locale::DEFAULT_LOCALE.to_string()),
            notes: input.notes,
            confirmation_token: random_hex(16),
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(meeting_id = meeting.id, %start, "Meeting booked");
    email::notify_meeting(&state, meeting.clone());

    Ok((StatusCode::CREATED, Json(DataResponse { data: meeting })))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/meetings
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PaginatedResponse<Meeting>>> {
    let (page, limit, offset) = params.resolve();
    let meetings = MeetingRepo::list(&state.pool, limit, offset).await?;
    let total = MeetingRepo::count(&state.pool).await?;
    Ok(Json(PaginatedResponse {
        data: meetings,
        meta: PageMeta::new(page, limit, total),
    }))
}

/// GET /api/v1/admin/meetings/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Meeting>>> {
    let meeting = MeetingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Meeting" }))?;
    Ok(Json(DataResponse { data: meeting }))
}

/// PATCH /api/v1/admin/meetings/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMeeting>,
) -> AppResult<Json<DataResponse<Meeting>>> {
    let meeting = MeetingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Meeting" }))?;
    Ok(Json(DataResponse { data: meeting }))
}

/// DELETE /api/v1/admin/meetings/{id}
///
/// Soft-cancel: the row is kept with status CANCELLED and a `cancelledAt`
/// stamp.
pub async fn cancel(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    MeetingRepo::cancel(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Meeting" }))?;
    tracing::info!(meeting_id = id, "Meeting cancelled");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/meetings/availability
pub async fn list_availability(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<AvailabilityWindow>>>> {
    let windows = AvailabilityRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: windows }))
}

/// PUT /api/v1/admin/meetings/availability
///
/// Full replacement of the weekly schedule. The batch is validated before
/// any row is touched; on rejection the stored set is unchanged.
pub async fn replace_availability(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<ReplaceAvailabilityRequest>,
) -> AppResult<Json<DataResponse<Vec<AvailabilityWindow>>>> {
    let windows = input
        .windows
        .iter()
        .map(WindowInput::to_window)
        .collect::<Result<Vec<_>, _>>()?;
    availability::validate_windows(&windows)?;

    AvailabilityRepo::replace_all(&state.pool, &input.windows).await?;

    let stored = AvailabilityRepo::list(&state.pool).await?;
    tracing::info!(count = stored.len(), "Availability schedule replaced");
    Ok(Json(DataResponse { data: stored }))
}
