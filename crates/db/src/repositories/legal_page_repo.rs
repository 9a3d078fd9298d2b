//! Repository for the `legal_pages` + `legal_page_translations` tables.

use sqlx::{PgConnection, PgPool};
use vitrine_core::types::DbId;

use crate::models::legal_page::{
    CreateLegalPage, LegalPage, LegalPageTranslation, LegalPageTranslationInput, UpdateLegalPage,
};

const COLUMNS: &str = "id, slug, created_at, updated_at";
const TRANSLATION_COLUMNS: &str = "legal_page_id, locale, title, content";

/// Provides CRUD operations for legal pages.
pub struct LegalPageRepo;

impl LegalPageRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateLegalPage,
    ) -> Result<(LegalPage, Vec<LegalPageTranslation>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("INSERT INTO legal_pages (slug) VALUES ($1) RETURNING {COLUMNS}");
        let parent = sqlx::query_as::<_, LegalPage>(&query)
            .bind(&input.slug)
            .fetch_one(&mut *tx)
            .await?;

        for t in &input.translations {
            Self::insert_translation(&mut *tx, parent.id, t).await?;
        }

        tx.commit().await?;

        let translations = Self::translations_for(pool, parent.id).await?;
        Ok((parent, translations))
    }

    pub async fn exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM legal_pages WHERE slug = $1)")
            .bind(slug)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        locale: Option<&str>,
    ) -> Result<Option<(LegalPage, Vec<LegalPageTranslation>)>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM legal_pages WHERE slug = $1");
        let Some(parent) = sqlx::query_as::<_, LegalPage>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let translations = match locale {
            Some(locale) => {
                let query = format!(
                    "SELECT {TRANSLATION_COLUMNS} FROM legal_page_translations
                     WHERE legal_page_id = $1 AND locale = $2"
                );
                sqlx::query_as::<_, LegalPageTranslation>(&query)
                    .bind(parent.id)
                    .bind(locale)
                    .fetch_all(pool)
                    .await?
            }
            None => Self::translations_for(pool, parent.id).await?,
        };

        Ok(Some((parent, translations)))
    }

    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<(LegalPage, Vec<LegalPageTranslation>)>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM legal_pages ORDER BY slug ASC LIMIT $1 OFFSET $2");
        let parents = sqlx::query_as::<_, LegalPage>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = parents.iter().map(|p| p.id).collect();
        let query = format!(
            "SELECT {TRANSLATION_COLUMNS} FROM legal_page_translations
             WHERE legal_page_id = ANY($1)"
        );
        let all_translations = sqlx::query_as::<_, LegalPageTranslation>(&query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        Ok(parents
            .into_iter()
            .map(|parent| {
                let translations = all_translations
                    .iter()
                    .filter(|t| t.legal_page_id == parent.id)
                    .cloned()
                    .collect();
                (parent, translations)
            })
            .collect())
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM legal_pages")
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        slug: &str,
        input: &UpdateLegalPage,
    ) -> Result<Option<(LegalPage, Vec<LegalPageTranslation>)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE legal_pages SET updated_at = NOW() WHERE slug = $1 RETURNING {COLUMNS}"
        );
        let Some(parent) = sqlx::query_as::<_, LegalPage>(&query)
            .bind(slug)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(translations) = &input.translations {
            sqlx::query("DELETE FROM legal_page_translations WHERE legal_page_id = $1")
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

    pub async fn delete(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM legal_page_translations
             WHERE legal_page_id = (SELECT id FROM legal_pages WHERE slug = $1)",
        )
        .bind(slug)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM legal_pages WHERE slug = $1")
            .bind(slug)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn translations_for(
        pool: &PgPool,
        legal_page_id: DbId,
    ) -> Result<Vec<LegalPageTranslation>, sqlx::Error> {
        let query = format!(
            "SELECT {TRANSLATION_COLUMNS} FROM legal_page_translations
             WHERE legal_page_id = $1 ORDER BY locale ASC"
        );
        sqlx::query_as::<_, LegalPageTranslation>(&query)
            .bind(legal_page_id)
            .fetch_all(pool)
            .await
    }

    async fn insert_translation(
        conn: &mut PgConnection,
        legal_page_id: DbId,
        t: &LegalPageTranslationInput,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO legal_page_translations (legal_page_id, locale, title, content)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(legal_page_id)
        .bind(&t.locale)
        .bind(&t.title)
        .bind(&t.content)
        .execute(conn)
        .await?;
        Ok(())
    }
}
