//! Meeting entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// Meeting lifecycle status, mapped to the `meeting_status` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "meeting_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum MeetingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

/// Full meeting row. Cancellation is a status transition plus a
/// `cancelled_at` stamp; rows are never deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub scheduled_at: Timestamp,
    #[serde(rename = "duration")]
    pub duration_mins: i32,
    pub timezone: String,
    pub locale: String,
    pub status: MeetingStatus,
    pub notes: Option<String>,
    pub confirmation_token: String,
    pub cancelled_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert DTO built by the handler after the booking has been validated.
#[derive(Debug)]
pub struct CreateMeeting {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub scheduled_at: Timestamp,
    pub duration_mins: i32,
    pub timezone: String,
    pub locale: String,
    pub notes: Option<String>,
    pub confirmation_token: String,
}

/// Admin update: status transition and/or notes.
#[derive(Debug, Deserialize)]
pub struct UpdateMeeting {
    pub status: Option<MeetingStatus>,
    pub notes: Option<String>,
}
