//! Repository for the `meeting_availability` table.

use sqlx::{PgConnection, PgPool};

use crate::models::availability::{AvailabilityWindow, WindowInput};

const COLUMNS: &str = "id, day_of_week, start_time, end_time, is_active, created_at, updated_at";

/// Provides access to the recurring availability windows.
pub struct AvailabilityRepo;

impl AvailabilityRepo {
    /// All windows, for the admin configuration view.
    pub async fn list(pool: &PgPool) -> Result<Vec<AvailabilityWindow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM meeting_availability ORDER BY day_of_week ASC, start_time ASC"
        );
        sqlx::query_as::<_, AvailabilityWindow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Only the active windows, for slot generation and booking validation.
    pub async fn list_active<'e, E>(executor: E) -> Result<Vec<AvailabilityWindow>, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM meeting_availability
             WHERE is_active ORDER BY day_of_week ASC, start_time ASC"
        );
        sqlx::query_as::<_, AvailabilityWindow>(&query)
            .fetch_all(executor)
            .await
    }

    /// Replace the entire availability set in one transaction.
    ///
    /// The caller validates the batch first; this method only performs the
    /// delete-all-then-recreate write, so a failure part-way rolls back to
    /// the previous set.
    pub async fn replace_all(pool: &PgPool, windows: &[WindowInput]) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM meeting_availability")
            .execute(&mut *tx)
            .await?;

        for w in windows {
            Self::insert(&mut *tx, w).await?;
        }

        tx.commit().await
    }

    async fn insert(conn: &mut PgConnection, input: &WindowInput) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO meeting_availability (day_of_week, start_time, end_time, is_active)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(input.day_of_week)
        .bind(&input.start_time)
        .bind(&input.end_time)
        .bind(input.is_active)
        .execute(conn)
        .await?;
        Ok(())
    }
}
