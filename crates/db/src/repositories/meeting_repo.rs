//! Repository for the `meetings` table.
//!
//! Booking insertion runs inside a caller-owned transaction holding an
//! advisory lock (see [`MeetingRepo::lock_for_booking`]) so the
//! check-then-insert sequence cannot race a concurrent booking for the
//! same slot.

use sqlx::{PgConnection, PgPool};
use vitrine_core::types::{DbId, Timestamp};

use crate::models::meeting::{CreateMeeting, Meeting, UpdateMeeting};

const COLUMNS: &str = "id, email, name, phone, scheduled_at, duration_mins, timezone, locale, \
                       status, notes, confirmation_token, cancelled_at, created_at, updated_at";

/// Key for the transaction-scoped advisory lock serializing bookings.
const BOOKING_LOCK_KEY: i64 = 0x6d65_6574; // "meet"

/// Provides CRUD operations for meetings.
pub struct MeetingRepo;

impl MeetingRepo {
    /// Take the booking advisory lock for the current transaction.
    ///
    /// Released automatically at commit/rollback. Must be acquired before
    /// [`Self::find_conflicting`] so two concurrent bookings cannot both
    /// pass the overlap check.
    pub async fn lock_for_booking(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(BOOKING_LOCK_KEY)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Non-cancelled meetings whose interval touches `[start, end)`.
    pub async fn find_conflicting(
        conn: &mut PgConnection,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Meeting>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM meetings
             WHERE status != 'CANCELLED'
               AND scheduled_at < $2
               AND scheduled_at + make_interval(mins => duration_mins) > $1"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(conn)
            .await
    }

    /// Insert a validated booking. Intended to run in the same transaction
    /// as the conflict check.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateMeeting,
    ) -> Result<Meeting, sqlx::Error> {
        let query = format!(
            "INSERT INTO meetings
                (email, name, phone, scheduled_at, duration_mins, timezone, locale, status,
                 notes, confirmation_token)
             VALUES ($1, $2, $3, $4, $5, $6, $7, 'CONFIRMED', $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(input.scheduled_at)
            .bind(input.duration_mins)
            .bind(&input.timezone)
            .bind(&input.locale)
            .bind(&input.notes)
            .bind(&input.confirmation_token)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Meeting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM meetings WHERE id = $1");
        sqlx::query_as::<_, Meeting>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Paginated admin list, most recently scheduled first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Meeting>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM meetings ORDER BY scheduled_at DESC, id DESC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Meeting>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM meetings")
            .fetch_one(pool)
            .await
    }

    /// Non-cancelled meetings whose interval touches `[start, end)` (slot
    /// generation). Same overlap predicate as [`Self::find_conflicting`] so
    /// a meeting spilling into the range from before it still blocks slots.
    pub async fn list_booked_between(
        pool: &PgPool,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Meeting>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM meetings
             WHERE status != 'CANCELLED'
               AND scheduled_at < $2
               AND scheduled_at + make_interval(mins => duration_mins) > $1"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }

    /// Apply an admin update. Transitioning to CANCELLED stamps
    /// `cancelled_at`. Returns `None` if the meeting is missing.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMeeting,
    ) -> Result<Option<Meeting>, sqlx::Error> {
        let query = format!(
            "UPDATE meetings SET
                status = COALESCE($2, status),
                cancelled_at = CASE
                    WHEN $2 = 'CANCELLED'::meeting_status THEN NOW()
                    ELSE cancelled_at
                END,
                notes = COALESCE($3, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(id)
            .bind(input.status)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Soft-cancel: status transition plus `cancelled_at` stamp, never a
    /// row deletion. Returns `None` if the meeting is missing.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Meeting>, sqlx::Error> {
        let query = format!(
            "UPDATE meetings SET status = 'CANCELLED', cancelled_at = NOW(), updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All meetings booked with the given email (GDPR export).
    pub async fn list_by_email(pool: &PgPool, email: &str) -> Result<Vec<Meeting>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM meetings WHERE email = $1 ORDER BY scheduled_at DESC");
        sqlx::query_as::<_, Meeting>(&query)
            .bind(email)
            .fetch_all(pool)
            .await
    }

    /// Delete every meeting booked with the given email (GDPR erasure).
    pub async fn delete_by_email(pool: &PgPool, email: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM meetings WHERE email = $1")
            .bind(email)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
