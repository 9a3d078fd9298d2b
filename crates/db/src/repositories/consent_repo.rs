//! Repository for the append-only `cookie_consents` table.

use sqlx::PgPool;

use crate::models::consent::{CookieConsent, RecordConsent};

const COLUMNS: &str = "id, user_id, email, consent, ip_address, user_agent, created_at";

/// Records and queries consent audit entries. Rows are never updated.
pub struct ConsentRepo;

impl ConsentRepo {
    pub async fn record(
        pool: &PgPool,
        input: &RecordConsent,
    ) -> Result<CookieConsent, sqlx::Error> {
        let query = format!(
            "INSERT INTO cookie_consents (user_id, email, consent, ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CookieConsent>(&query)
            .bind(input.user_id)
            .bind(&input.email)
            .bind(input.consent)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Full consent history for one email, newest first.
    pub async fn list_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Vec<CookieConsent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cookie_consents WHERE email = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CookieConsent>(&query)
            .bind(email)
            .fetch_all(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CookieConsent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cookie_consents
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, CookieConsent>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM cookie_consents")
            .fetch_one(pool)
            .await
    }

    /// GDPR erasure support: detach and blank records tied to an email.
    pub async fn anonymize_by_email(pool: &PgPool, email: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cookie_consents
             SET email = NULL, ip_address = NULL, user_agent = NULL
             WHERE email = $1",
        )
        .bind(email)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
