//! Repository for the `testimonials` + `testimonial_translations` tables.
//!
//! Same full-replace translation strategy as content blocks. The public
//! listing only returns active rows, ordered by display rank.

use sqlx::{PgConnection, PgPool};
use vitrine_core::types::DbId;

use crate::models::testimonial::{
    CreateTestimonial, Testimonial, TestimonialTranslation, TestimonialTranslationInput,
    UpdateTestimonial,
};

const COLUMNS: &str = "id, display_order, is_active, created_at, updated_at";
const TRANSLATION_COLUMNS: &str = "testimonial_id, locale, name, role, company, content";

/// Provides CRUD operations for testimonials.
pub struct TestimonialRepo;

impl TestimonialRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateTestimonial,
    ) -> Result<(Testimonial, Vec<TestimonialTranslation>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO testimonials (display_order, is_active)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let parent = sqlx::query_as::<_, Testimonial>(&query)
            .bind(input.display_order)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;

        for t in &input.translations {
            Self::insert_translation(&mut *tx, parent.id, t).await?;
        }

        tx.commit().await?;

        let translations = Self::translations_for(pool, parent.id).await?;
        Ok((parent, translations))
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        locale: Option<&str>,
    ) -> Result<Option<(Testimonial, Vec<TestimonialTranslation>)>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM testimonials WHERE id = $1");
        let Some(parent) = sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let translations = match locale {
            Some(locale) => {
                let query = format!(
                    "SELECT {TRANSLATION_COLUMNS} FROM testimonial_translations
                     WHERE testimonial_id = $1 AND locale = $2"
                );
                sqlx::query_as::<_, TestimonialTranslation>(&query)
                    .bind(parent.id)
                    .bind(locale)
                    .fetch_all(pool)
                    .await?
            }
            None => Self::translations_for(pool, parent.id).await?,
        };

        Ok(Some((parent, translations)))
    }

    /// Active testimonials only, lowest rank first. This backs the public
    /// endpoint and is not paginated.
    pub async fn list_active(
        pool: &PgPool,
        locale: Option<&str>,
    ) -> Result<Vec<(Testimonial, Vec<TestimonialTranslation>)>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM testimonials
             WHERE is_active
             ORDER BY display_order ASC, id ASC"
        );
        let parents = sqlx::query_as::<_, Testimonial>(&query)
            .fetch_all(pool)
            .await?;
        Self::attach_translations(pool, parents, locale).await
    }

    /// All testimonials for the admin panel, paginated.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<(Testimonial, Vec<TestimonialTranslation>)>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM testimonials
             ORDER BY display_order ASC, id ASC
             LIMIT $1 OFFSET $2"
        );
        let parents = sqlx::query_as::<_, Testimonial>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
        Self::attach_translations(pool, parents, None).await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM testimonials")
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTestimonial,
    ) -> Result<Option<(Testimonial, Vec<TestimonialTranslation>)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE testimonials
             SET display_order = COALESCE($2, display_order),
                 is_active = COALESCE($3, is_active),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(parent) = sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .bind(input.display_order)
            .bind(input.is_active)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(translations) = &input.translations {
            sqlx::query("DELETE FROM testimonial_translations WHERE testimonial_id = $1")
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

    pub async fn update_order(
        pool: &PgPool,
        id: DbId,
        display_order: i32,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!(
            "UPDATE testimonials SET display_order = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .bind(display_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM testimonial_translations WHERE testimonial_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn attach_translations(
        pool: &PgPool,
        parents: Vec<Testimonial>,
        locale: Option<&str>,
    ) -> Result<Vec<(Testimonial, Vec<TestimonialTranslation>)>, sqlx::Error> {
        let ids: Vec<DbId> = parents.iter().map(|t| t.id).collect();
        let query = match locale {
            Some(_) => format!(
                "SELECT {TRANSLATION_COLUMNS} FROM testimonial_translations
                 WHERE testimonial_id = ANY($1) AND locale = $2"
            ),
            None => format!(
                "SELECT {TRANSLATION_COLUMNS} FROM testimonial_translations
                 WHERE testimonial_id = ANY($1)"
            ),
        };
        let mut q = sqlx::query_as::<_, TestimonialTranslation>(&query).bind(&ids);
        if let Some(locale) = locale {
            q = q.bind(locale);
        }
        let all_translations = q.fetch_all(pool).await?;

        Ok(parents
            .into_iter()
            .map(|parent| {
                let translations = all_translations
                    .iter()
                    .filter(|t| t.testimonial_id == parent.id)
                    .cloned()
                    .collect();
                (parent, translations)
            })
            .collect())
    }

    async fn translations_for(
        pool: &PgPool,
        testimonial_id: DbId,
    ) -> Result<Vec<TestimonialTranslation>, sqlx::Error> {
        let query = format!(
            "SELECT {TRANSLATION_COLUMNS} FROM testimonial_translations
             WHERE testimonial_id = $1 ORDER BY locale ASC"
        );
        sqlx::query_as::<_, TestimonialTranslation>(&query)
            .bind(testimonial_id)
            .fetch_all(pool)
            .await
    }

    async fn insert_translation(
        conn: &mut PgConnection,
        testimonial_id: DbId,
        t: &TestimonialTranslationInput,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO testimonial_translations
             (testimonial_id, locale, name, role, company, content)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(testimonial_id)
        .bind(&t.locale)
        .bind(&t.name)
        .bind(&t.role)
        .bind(&t.company)
        .bind(&t.content)
        .execute(conn)
        .await?;
        Ok(())
    }
}
