//! Meeting availability and booking-conflict engine.
//!
//! Availability is a set of recurring weekly windows (`day_of_week` 0-6 with
//! 0 = Sunday, plus `HH:mm` start/end). Bookings are concrete instants with
//! a duration in minutes. Everything here is pure so it can be exercised
//! without a database; the repositories feed it rows and persist the result.
//!
//! All interval checks use half-open `[start, end)` semantics: two intervals
//! overlap iff `a_start < b_end && b_start < a_end`. Back-to-back slots
//! (one ending exactly when the next starts) therefore do not conflict.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};

use crate::error::CoreError;

/// Length of a bookable slot in minutes.
pub const SLOT_MINUTES: i64 = 30;

// ---------------------------------------------------------------------------
// TimeOfDay
// ---------------------------------------------------------------------------

/// A wall-clock time of day stored as minutes since midnight.
///
/// Parsed from the `"HH:mm"` strings the availability table stores; ordering
/// is plain minute ordering, which makes window sorting and the overlap test
/// trivial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Parse a `"HH:mm"` string (24-hour clock).
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::validation(format!("Invalid time of day: {s:?}"));

        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u16 = h.parse().map_err(|_| invalid())?;
        let minute: u16 = m.parse().map_err(|_| invalid())?;
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }
        Ok(TimeOfDay(hour * 60 + minute))
    }

    /// Construct from minutes since midnight. Panics past 24h; only used
    /// with already-validated values.
    pub fn from_minutes(minutes: u16) -> Self {
        assert!(minutes < 24 * 60, "minutes out of range: {minutes}");
        TimeOfDay(minutes)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// A recurring weekly availability window.
#[derive(Debug, Clone)]
pub struct Window {
    /// 0 = Sunday through 6 = Saturday.
    pub day_of_week: i16,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub is_active: bool,
}

/// An existing non-cancelled booking.
#[derive(Debug, Clone)]
pub struct Booking {
    pub starts_at: DateTime<Utc>,
    pub duration_mins: i32,
}

impl Booking {
    fn ends_at(&self) -> DateTime<Utc> {
        self.starts_at + Duration::minutes(self.duration_mins as i64)
    }
}

/// A free 30-minute slot offered to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub date: NaiveDate,
    pub starts_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Overlap test
// ---------------------------------------------------------------------------

/// Half-open interval overlap: covers exact match, partial overlap on either
/// side, and full containment in both directions.
pub fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

fn conflicts_with_any(start: DateTime<Utc>, end: DateTime<Utc>, bookings: &[Booking]) -> bool {
    bookings
        .iter()
        .any(|b| intervals_overlap(start, end, b.starts_at, b.ends_at()))
}

/// Weekday of a UTC instant using the 0 = Sunday convention the
/// availability table stores.
fn day_of_week(at: DateTime<Utc>) -> i16 {
    at.weekday().num_days_from_sunday() as i16
}

fn date_day_of_week(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

// ---------------------------------------------------------------------------
// Slot generation
// ---------------------------------------------------------------------------

/// Generate all free future slots in `[start_date, end_date]` (inclusive).
///
/// For every day in range, each active window matching that weekday is cut
/// into [`SLOT_MINUTES`] slots from its start; a slot is kept when it does
/// not overlap any booking and starts strictly after `now`. The result is
/// chronological.
pub fn generate_slots(
    start_date: NaiveDate,
    end_date: NaiveDate,
    windows: &[Window],
    bookings: &[Booking],
    now: DateTime<Utc>,
) -> Vec<Slot> {
    let mut slots = Vec::new();
    let mut date = start_date;

    while date <= end_date {
        let dow = date_day_of_week(date);
        for window in windows.iter().filter(|w| w.is_active && w.day_of_week == dow) {
            let mut cursor = date
                .and_hms_opt(window.start.hour() as u32, window.start.minute() as u32, 0)
                .expect("validated time of day")
                .and_utc();
            let window_end = date
                .and_hms_opt(window.end.hour() as u32, window.end.minute() as u32, 0)
                .expect("validated time of day")
                .and_utc();

            while cursor < window_end {
                let slot_end = cursor + Duration::minutes(SLOT_MINUTES);
                if cursor > now && !conflicts_with_any(cursor, slot_end, bookings) {
                    slots.push(Slot {
                        date,
                        starts_at: cursor,
                    });
                }
                cursor = slot_end;
            }
        }
        date = date.succ_opt().expect("date range within chrono bounds");
    }

    slots.sort_by_key(|s| s.starts_at);
    slots
}

// ---------------------------------------------------------------------------
// Booking validation
// ---------------------------------------------------------------------------

/// Validate a booking request against the availability windows and the
/// current set of non-cancelled bookings.
///
/// Window membership uses inclusive bounds on the requested start time
/// (`start <= HH:mm <= end`); the conflict test is the usual half-open
/// interval overlap.
pub fn validate_booking(
    at: DateTime<Utc>,
    duration_mins: i32,
    windows: &[Window],
    bookings: &[Booking],
    now: DateTime<Utc>,
) -> Result<(), CoreError> {
    if at <= now {
        return Err(CoreError::validation(
            "Meeting must be scheduled in the future",
        ));
    }

    let dow = day_of_week(at);
    let requested = TimeOfDay::from_minutes((at.hour() * 60 + at.minute()) as u16);
    let in_window = windows.iter().any(|w| {
        w.is_active && w.day_of_week == dow && w.start <= requested && requested <= w.end
    });
    if !in_window {
        return Err(CoreError::validation("Selected time slot is not available"));
    }

    let end = at + Duration::minutes(duration_mins as i64);
    if conflicts_with_any(at, end, bookings) {
        return Err(CoreError::validation("Selected time slot is not available"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Window-set validation
// ---------------------------------------------------------------------------

/// Validate a replacement availability set before any row is touched.
///
/// Rejects the whole batch when any window has `start >= end` or when two
/// active windows on the same weekday overlap. Windows are sorted by start
/// time per day so each window only needs comparing with its successors.
pub fn validate_windows(windows: &[Window]) -> Result<(), CoreError> {
    for w in windows {
        if w.start >= w.end {
            return Err(CoreError::validation(format!(
                "Invalid time range for {}: start time ({}) must be before end time ({})",
                day_name(w.day_of_week),
                w.start,
                w.end
            )));
        }
    }

    for day in 0..7i16 {
        let mut same_day: Vec<&Window> = windows
            .iter()
            .filter(|w| w.is_active && w.day_of_week == day)
            .collect();
        same_day.sort_by_key(|w| w.start);

        for pair in same_day.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if b.start < a.end {
                return Err(CoreError::validation(format!(
                    "Overlapping time slots detected for {}: {}-{} overlaps with {}-{}",
                    day_name(day),
                    a.start,
                    a.end,
                    b.start,
                    b.end
                )));
            }
        }
    }

    Ok(())
}

/// Human-readable weekday name for validation messages.
pub fn day_name(day_of_week: i16) -> &'static str {
    match day_of_week {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn window(dow: i16, start: &str, end: &str) -> Window {
        Window {
            day_of_week: dow,
            start: t(start),
            end: t(end),
            is_active: true,
        }
    }

    fn booking(starts_at: DateTime<Utc>, duration_mins: i32) -> Booking {
        Booking {
            starts_at,
            duration_mins,
        }
    }

    // -- TimeOfDay ---------------------------------------------------------

    #[test]
    fn parses_valid_times() {
        assert_eq!(t("00:00").minutes(), 0);
        assert_eq!(t("09:30").minutes(), 570);
        assert_eq!(t("23:59").minutes(), 1439);
        assert_eq!(t("17:05").to_string(), "17:05");
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["24:00", "09:60", "9:30", "09-30", "09:3", "", "ab:cd"] {
            assert!(TimeOfDay::parse(bad).is_err(), "{bad:?} should not parse");
        }
    }

    // -- Overlap: the four boundary cases ----------------------------------

    #[test]
    fn overlap_exact_match() {
        let a = at(2026, 9, 7, 10, 0);
        let b = at(2026, 9, 7, 10, 30);
        assert!(intervals_overlap(a, b, a, b));
    }

    #[test]
    fn overlap_partial_left() {
        // Meeting 09:45-10:15 vs slot 10:00-10:30.
        assert!(intervals_overlap(
            at(2026, 9, 7, 10, 0),
            at(2026, 9, 7, 10, 30),
            at(2026, 9, 7, 9, 45),
            at(2026, 9, 7, 10, 15),
        ));
    }

    #[test]
    fn overlap_partial_right() {
        // Meeting 10:15-10:45 vs slot 10:00-10:30.
        assert!(intervals_overlap(
            at(2026, 9, 7, 10, 0),
            at(2026, 9, 7, 10, 30),
            at(2026, 9, 7, 10, 15),
            at(2026, 9, 7, 10, 45),
        ));
    }

    #[test]
    fn overlap_containment_both_directions() {
        // Slot inside a long meeting.
        assert!(intervals_overlap(
            at(2026, 9, 7, 10, 0),
            at(2026, 9, 7, 10, 30),
            at(2026, 9, 7, 9, 0),
            at(2026, 9, 7, 12, 0),
        ));
        // Short meeting inside the slot.
        assert!(intervals_overlap(
            at(2026, 9, 7, 10, 0),
            at(2026, 9, 7, 10, 30),
            at(2026, 9, 7, 10, 10),
            at(2026, 9, 7, 10, 20),
        ));
    }

    #[test]
    fn back_to_back_does_not_overlap() {
        assert!(!intervals_overlap(
            at(2026, 9, 7, 10, 0),
            at(2026, 9, 7, 10, 30),
            at(2026, 9, 7, 10, 30),
            at(2026, 9, 7, 11, 0),
        ));
    }

    // -- Slot generation ---------------------------------------------------

    /// Monday 09:00-17:00 window with a meeting at 10:00 for 30 minutes:
    /// the 10:00 slot is omitted, 09:30 and 10:30 are present.
    #[test]
    fn booked_slot_is_omitted_neighbors_kept() {
        // 2026-09-07 is a Monday.
        let monday = NaiveDate::from_ymd_opt(2026, 9, 7).unwrap();
        let windows = [window(1, "09:00", "17:00")];
        let bookings = [booking(at(2026, 9, 7, 10, 0), 30)];
        let now = at(2026, 9, 1, 0, 0);

        let slots = generate_slots(monday, monday, &windows, &bookings, now);
        let starts: Vec<DateTime<Utc>> = slots.iter().map(|s| s.starts_at).collect();

        assert!(starts.contains(&at(2026, 9, 7, 9, 30)));
        assert!(!starts.contains(&at(2026, 9, 7, 10, 0)));
        assert!(starts.contains(&at(2026, 9, 7, 10, 30)));
        // 16 half-hour slots in 09:00-17:00, minus the booked one.
        assert_eq!(slots.len(), 15);
    }

    #[test]
    fn long_meeting_blocks_all_contained_slots() {
        let monday = NaiveDate::from_ymd_opt(2026, 9, 7).unwrap();
        let windows = [window(1, "09:00", "12:00")];
        // 09:30-11:30 blocks the 09:30, 10:00, 10:30, and 11:00 slots.
        let bookings = [booking(at(2026, 9, 7, 9, 30), 120)];
        let now = at(2026, 9, 1, 0, 0);

        let slots = generate_slots(monday, monday, &windows, &bookings, now);
        let starts: Vec<DateTime<Utc>> = slots.iter().map(|s| s.starts_at).collect();

        assert_eq!(starts, vec![at(2026, 9, 7, 9, 0), at(2026, 9, 7, 11, 30)]);
    }

    #[test]
    fn past_slots_are_excluded() {
        let monday = NaiveDate::from_ymd_opt(2026, 9, 7).unwrap();
        let windows = [window(1, "09:00", "11:00")];
        let now = at(2026, 9, 7, 10, 0);

        let slots = generate_slots(monday, monday, &windows, &[], now);
        let starts: Vec<DateTime<Utc>> = slots.iter().map(|s| s.starts_at).collect();

        // 10:00 itself is not strictly in the future.
        assert_eq!(starts, vec![at(2026, 9, 7, 10, 30)]);
    }

    #[test]
    fn inactive_and_other_day_windows_are_ignored() {
        let monday = NaiveDate::from_ymd_opt(2026, 9, 7).unwrap();
        let mut inactive = window(1, "09:00", "17:00");
        inactive.is_active = false;
        let windows = [inactive, window(2, "09:00", "17:00")];
        let now = at(2026, 9, 1, 0, 0);

        assert!(generate_slots(monday, monday, &windows, &[], now).is_empty());
    }

    #[test]
    fn slots_span_multiple_days_in_order() {
        let monday = NaiveDate::from_ymd_opt(2026, 9, 7).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2026, 9, 8).unwrap();
        let windows = [window(1, "09:00", "10:00"), window(2, "09:00", "10:00")];
        let now = at(2026, 9, 1, 0, 0);

        let slots = generate_slots(monday, tuesday, &windows, &[], now);
        assert_eq!(slots.len(), 4);
        assert!(slots.windows(2).all(|p| p[0].starts_at < p[1].starts_at));
        assert_eq!(slots[0].date, monday);
        assert_eq!(slots[3].date, tuesday);
    }

    // -- Booking validation ------------------------------------------------

    #[test]
    fn booking_in_past_is_rejected() {
        let windows = [window(1, "00:00", "23:59")];
        let now = at(2026, 9, 8, 12, 0);
        let err = validate_booking(at(2026, 9, 7, 10, 0), 30, &windows, &[], now).unwrap_err();
        assert!(err.to_string().contains("in the future"));
    }

    #[test]
    fn booking_outside_window_is_rejected() {
        let windows = [window(1, "09:00", "17:00")];
        let now = at(2026, 9, 1, 0, 0);
        // Monday 18:00 is outside the window.
        assert!(validate_booking(at(2026, 9, 7, 18, 0), 30, &windows, &[], now).is_err());
        // Tuesday has no window at all.
        assert!(validate_booking(at(2026, 9, 8, 10, 0), 30, &windows, &[], now).is_err());
    }

    #[test]
    fn booking_on_window_boundaries_is_accepted() {
        let windows = [window(1, "09:00", "17:00")];
        let now = at(2026, 9, 1, 0, 0);
        assert!(validate_booking(at(2026, 9, 7, 9, 0), 30, &windows, &[], now).is_ok());
        assert!(validate_booking(at(2026, 9, 7, 17, 0), 30, &windows, &[], now).is_ok());
    }

    #[test]
    fn conflicting_booking_is_rejected() {
        let windows = [window(1, "09:00", "17:00")];
        let bookings = [booking(at(2026, 9, 7, 10, 0), 60)];
        let now = at(2026, 9, 1, 0, 0);

        assert!(validate_booking(at(2026, 9, 7, 10, 30), 30, &windows, &bookings, now).is_err());
        // Ends exactly when the existing one starts: allowed.
        assert!(validate_booking(at(2026, 9, 7, 9, 30), 30, &windows, &bookings, now).is_ok());
        // Starts exactly when the existing one ends: allowed.
        assert!(validate_booking(at(2026, 9, 7, 11, 0), 30, &windows, &bookings, now).is_ok());
    }

    // -- Window-set validation ---------------------------------------------

    #[test]
    fn inverted_range_rejects_batch() {
        let windows = [window(1, "09:00", "17:00"), window(2, "14:00", "12:00")];
        let err = validate_windows(&windows).unwrap_err();
        assert!(err.to_string().contains("Tuesday"));
    }

    #[test]
    fn equal_start_end_rejects_batch() {
        let windows = [window(3, "09:00", "09:00")];
        assert!(validate_windows(&windows).is_err());
    }

    /// Monday 09:00-12:00 and 11:00-14:00 overlap and reject the batch.
    #[test]
    fn same_day_overlap_rejects_batch() {
        let windows = [window(1, "09:00", "12:00"), window(1, "11:00", "14:00")];
        let err = validate_windows(&windows).unwrap_err();
        assert!(err.to_string().contains("Monday"));
    }

    #[test]
    fn adjacent_windows_are_fine() {
        let windows = [window(1, "09:00", "12:00"), window(1, "12:00", "17:00")];
        assert!(validate_windows(&windows).is_ok());
    }

    #[test]
    fn overlap_on_different_days_is_fine() {
        let windows = [window(1, "09:00", "12:00"), window(2, "09:00", "12:00")];
        assert!(validate_windows(&windows).is_ok());
    }

    #[test]
    fn inactive_windows_do_not_count_for_overlap() {
        let mut off = window(1, "09:00", "12:00");
        off.is_active = false;
        let windows = [off, window(1, "10:00", "14:00")];
        assert!(validate_windows(&windows).is_ok());
    }
}
