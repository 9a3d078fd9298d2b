//! Availability window rows (recurring weekly open intervals).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::availability::{TimeOfDay, Window};
use vitrine_core::error::CoreError;
use vitrine_core::types::{DbId, Timestamp};

/// A stored availability window.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    pub id: DbId,
    pub day_of_week: i16,
    pub start_time: String,
    pub end_time: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AvailabilityWindow {
    /// Convert a stored row into the engine's [`Window`] form.
    ///
    /// Stored rows were validated on write, so a parse failure here means
    /// the table was edited out-of-band; it is reported as an internal
    /// error rather than a validation failure.
    pub fn to_window(&self) -> Result<Window, CoreError> {
        let parse = |s: &str| {
            TimeOfDay::parse(s).map_err(|_| {
                CoreError::Internal(format!("Corrupt availability time in row {}: {s:?}", self.id))
            })
        };
        Ok(Window {
            day_of_week: self.day_of_week,
            start: parse(&self.start_time)?,
            end: parse(&self.end_time)?,
            is_active: self.is_active,
        })
    }
}

/// One window in a replacement availability set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowInput {
    pub day_of_week: i16,
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl WindowInput {
    /// Parse into the engine form, rejecting malformed times or weekdays.
    pub fn to_window(&self) -> Result<Window, CoreError> {
        if !(0..=6).contains(&self.day_of_week) {
            return Err(CoreError::validation(format!(
                "dayOfWeek must be between 0 and 6, got {}",
                self.day_of_week
            )));
        }
        Ok(Window {
            day_of_week: self.day_of_week,
            start: TimeOfDay::parse(&self.start_time)?,
            end: TimeOfDay::parse(&self.end_time)?,
            is_active: self.is_active,
        })
    }
}
