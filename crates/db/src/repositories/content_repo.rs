//! Repository for the `contents` + `content_translations` tables.
//!
//! Translation updates are a full replace: the existing rows are deleted and
//! the new set inserted inside one transaction, so observers see either the
//! old set or the new one, never a mix. Locales in the input DTOs are
//! already normalized by the handler.

use sqlx::{PgConnection, PgPool};
use vitrine_core::types::DbId;

use crate::models::content::{
    Content, ContentTranslation, ContentTranslationInput, CreateContent, UpdateContent,
};

const COLUMNS: &str = "id, key, type, created_at, updated_at";
const TRANSLATION_COLUMNS: &str = "content_id, locale, value";

/// Provides CRUD operations for content blocks.
pub struct ContentRepo;

impl ContentRepo {
    /// Insert parent + all translation rows atomically.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContent,
    ) -> Result<(Content, Vec<ContentTranslation>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("INSERT INTO contents (key, type) VALUES ($1, $2) RETURNING {COLUMNS}");
        let parent = sqlx::query_as::<_, Content>(&query)
            .bind(&input.key)
            .bind(input.content_type)
            .fetch_one(&mut *tx)
            .await?;

        for t in &input.translations {
            Self::insert_translation(&mut *tx, parent.id, t).await?;
        }

        tx.commit().await?;

        let translations = Self::translations_for(pool, parent.id).await?;
        Ok((parent, translations))
    }

    pub async fn exists(pool: &PgPool, key: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM contents WHERE key = $1)")
            .bind(key)
            .fetch_one(pool)
            .await
    }

    /// Look up by key; `locale` restricts the returned translations.
    pub async fn find_by_key(
        pool: &PgPool,
        key: &str,
        locale: Option<&str>,
    ) -> Result<Option<(Content, Vec<ContentTranslation>)>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contents WHERE key = $1");
        let Some(parent) = sqlx::query_as::<_, Content>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let translations = match locale {
            Some(locale) => {
                let query = format!(
                    "SELECT {TRANSLATION_COLUMNS} FROM content_translations
                     WHERE content_id = $1 AND locale = $2"
                );
                sqlx::query_as::<_, ContentTranslation>(&query)
                    .bind(parent.id)
                    .bind(locale)
                    .fetch_all(pool)
                    .await?
            }
            None => Self::translations_for(pool, parent.id).await?,
        };

        Ok(Some((parent, translations)))
    }

    /// Paginated list ordered by key, each parent paired with its
    /// translations (optionally restricted to one locale).
    pub async fn list(
        pool: &PgPool,
        locale: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<(Content, Vec<ContentTranslation>)>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contents ORDER BY key ASC LIMIT $1 OFFSET $2");
        let parents = sqlx::query_as::<_, Content>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = parents.iter().map(|c| c.id).collect();
        let query = match locale {
            Some(_) => format!(
                "SELECT {TRANSLATION_COLUMNS} FROM content_translations
                 WHERE content_id = ANY($1) AND locale = $2"
            ),
            None => format!(
                "SELECT {TRANSLATION_COLUMNS} FROM content_translations WHERE content_id = ANY($1)"
            ),
        };
        let mut q = sqlx::query_as::<_, ContentTranslation>(&query).bind(&ids);
        if let Some(locale) = locale {
            q = q.bind(locale);
        }
        let all_translations = q.fetch_all(pool).await?;

        Ok(parents
            .into_iter()
            .map(|parent| {
                let translations = all_translations
                    .iter()
                    .filter(|t| t.content_id == parent.id)
                    .cloned()
                    .collect();
                (parent, translations)
            })
            .collect())
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM contents")
            .fetch_one(pool)
            .await
    }

    /// Update the type and (when supplied) full-replace the translation
    /// set. Returns `None` if the key does not exist.
    pub async fn update(
        pool: &PgPool,
        key: &str,
        input: &UpdateContent,
    ) -> Result<Option<(Content, Vec<ContentTranslation>)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE contents SET type = COALESCE($2, type), updated_at = NOW()
             WHERE key = $1
             RETURNING {COLUMNS}"
        );
        let Some(parent) = sqlx::query_as::<_, Content>(&query)
            .bind(key)
            .bind(input.content_type)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(translations) = &input.translations {
            sqlx::query("DELETE FROM content_translations WHERE content_id = $1")
                .bind(parent.id)
                .execute(&mut *tx)
                .await?;
            for t in translations {
                Self::insert_translation(&mut *tx, parent.id, t).await?;
            }
        }

        tx.commit().await?;

        let translations = Self::translations_for(pool, parent.id).await?;
        Ok(Some((parent, translations)))
    }

    /// Two-step cascade: translation rows first, then the parent.
    pub async fn delete(pool: &PgPool, key: &str) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM content_translations
             WHERE content_id = (SELECT id FROM contents WHERE key = $1)",
        )
        .bind(key)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM contents WHERE key = $1")
            .bind(key)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn translations_for(
        pool: &PgPool,
        content_id: DbId,
    ) -> Result<Vec<ContentTranslation>, sqlx::Error> {
        let query = format!(
            "SELECT {TRANSLATION_COLUMNS} FROM content_translations
             WHERE content_id = $1 ORDER BY locale ASC"
        );
        sqlx::query_as::<_, ContentTranslation>(&query)
            .bind(content_id)
            .fetch_all(pool)
            .await
    }

    async fn insert_translation(
        conn: &mut PgConnection,
        content_id: DbId,
        t: &ContentTranslationInput,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO content_translations (content_id, locale, value) VALUES ($1, $2, $3)",
        )
        .bind(content_id)
        .bind(&t.locale)
        .bind(&t.value)
        .execute(conn)
        .await?;
        Ok(())
    }
}
