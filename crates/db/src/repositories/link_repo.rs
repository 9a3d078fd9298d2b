//! Repository for the `social_links` and `external_links` tables.
//!
//! The two link kinds share a shape but live in separate tables, so the
//! methods are duplicated per table rather than abstracted.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::link::{
    CreateExternalLink, CreateSocialLink, ExternalLink, SocialLink, UpdateExternalLink,
    UpdateSocialLink,
};

const SOCIAL_COLUMNS: &str = "id, platform, url, display_order, is_active, created_at, updated_at";
const EXTERNAL_COLUMNS: &str = "id, label, url, display_order, is_active, created_at, updated_at";

/// Provides CRUD operations for social and external links.
pub struct LinkRepo;

impl LinkRepo {
    pub async fn create_social(
        pool: &PgPool,
        input: &CreateSocialLink,
    ) -> Result<SocialLink, sqlx::Error> {
        let query = format!(
            "INSERT INTO social_links (platform, url, display_order, is_active)
             VALUES ($1, $2, $3, $4)
             RETURNING {SOCIAL_COLUMNS}"
        );
        sqlx::query_as::<_, SocialLink>(&query)
            .bind(&input.platform)
            .bind(&input.url)
            .bind(input.display_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Active links only, lowest rank first. Backs the public endpoint.
    pub async fn list_active_social(pool: &PgPool) -> Result<Vec<SocialLink>, sqlx::Error> {
        let query = format!(
            "SELECT {SOCIAL_COLUMNS} FROM social_links
             WHERE is_active
             ORDER BY display_order ASC, id ASC"
        );
        sqlx::query_as::<_, SocialLink>(&query).fetch_all(pool).await
    }

    pub async fn list_social(pool: &PgPool) -> Result<Vec<SocialLink>, sqlx::Error> {
        let query = format!(
            "SELECT {SOCIAL_COLUMNS} FROM social_links ORDER BY display_order ASC, id ASC"
        );
        sqlx::query_as::<_, SocialLink>(&query).fetch_all(pool).await
    }

    pub async fn update_social(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSocialLink,
    ) -> Result<Option<SocialLink>, sqlx::Error> {
        let query = format!(
            "UPDATE social_links
             SET platform = COALESCE($2, platform),
                 url = COALESCE($3, url),
                 display_order = COALESCE($4, display_order),
                 is_active = COALESCE($5, is_active),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {SOCIAL_COLUMNS}"
        );
        sqlx::query_as::<_, SocialLink>(&query)
            .bind(id)
            .bind(&input.platform)
            .bind(&input.url)
            .bind(input.display_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete_social(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM social_links WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn create_external(
        pool: &PgPool,
        input: &CreateExternalLink,
    ) -> Result<ExternalLink, sqlx::Error> {
        let query = format!(
            "INSERT INTO external_links (label, url, display_order, is_active)
             VALUES ($1, $2, $3, $4)
             RETURNING {EXTERNAL_COLUMNS}"
        );
        sqlx::query_as::<_, ExternalLink>(&query)
            .bind(&input.label)
            .bind(&input.url)
            .bind(input.display_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn list_active_external(pool: &PgPool) -> Result<Vec<ExternalLink>, sqlx::Error> {
        let query = format!(
            "SELECT {EXTERNAL_COLUMNS} FROM external_links
             WHERE is_active
             ORDER BY display_order ASC, id ASC"
        );
        sqlx::query_as::<_, ExternalLink>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn list_external(pool: &PgPool) -> Result<Vec<ExternalLink>, sqlx::Error> {
        let query = format!(
            "SELECT {EXTERNAL_COLUMNS} FROM external_links ORDER BY display_order ASC, id ASC"
        );
        sqlx::query_as::<_, ExternalLink>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update_external(
        pool: &PgPool,
        id: DbId,
        input: &UpdateExternalLink,
    ) -> Result<Option<ExternalLink>, sqlx::Error> {
        let query = format!(
            "UPDATE external_links
             SET label = COALESCE($2, label),
                 url = COALESCE($3, url),
                 display_order = COALESCE($4, display_order),
                 is_active = COALESCE($5, is_active),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {EXTERNAL_COLUMNS}"
        );
        sqlx::query_as::<_, ExternalLink>(&query)
            .bind(id)
            .bind(&input.label)
            .bind(&input.url)
            .bind(input.display_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete_external(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM external_links WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
