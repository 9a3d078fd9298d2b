//! Repository for the `leads` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::lead::{CreateLead, Lead, LeadStatus};

const COLUMNS: &str =
    "id, name, email, phone, message, status, source, locale, metadata, created_at, updated_at";

/// Provides CRUD operations for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead with status NEW.
    pub async fn create(pool: &PgPool, input: &CreateLead) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (name, email, phone, message, source, locale, metadata)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.message)
            .bind(&input.source)
            .bind(&input.locale)
            .bind(&input.metadata)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Paginated list, newest first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Lead>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM leads ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Lead>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Full table export, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Lead>(&query).fetch_all(pool).await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM leads")
            .fetch_one(pool)
            .await
    }

    /// Update the pipeline status. Returns `None` if the lead is missing.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: LeadStatus,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Hard delete (admin action or GDPR erasure). Returns `true` when a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All leads submitted with the given email (GDPR export).
    pub async fn list_by_email(pool: &PgPool, email: &str) -> Result<Vec<Lead>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM leads WHERE email = $1 ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Lead>(&query)
            .bind(email)
            .fetch_all(pool)
            .await
    }

    /// Delete every lead submitted with the given email (GDPR erasure).
    pub async fn delete_by_email(pool: &PgPool, email: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leads WHERE email = $1")
            .bind(email)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
