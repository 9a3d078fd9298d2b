//! Legal page entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// Parent legal page row, addressed by unique slug.
#[derive(Debug, Clone, FromRow)]
pub struct LegalPage {
    pub id: DbId,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Per-locale translation row (title + markdown content).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LegalPageTranslation {
    #[serde(skip)]
    pub legal_page_id: DbId,
    pub locale: String,
    pub title: String,
    pub content: String,
}

/// Legal page plus its translations, as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalPageResponse {
    pub id: DbId,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub translations: Vec<LegalPageTranslation>,
}

impl LegalPageResponse {
    pub fn from_parts(parent: LegalPage, translations: Vec<LegalPageTranslation>) -> Self {
        LegalPageResponse {
            id: parent.id,
            slug: parent.slug,
            created_at: parent.created_at,
            updated_at: parent.updated_at,
            translations,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegalPageTranslationInput {
    pub locale: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateLegalPage {
    pub slug: String,
    pub translations: Vec<LegalPageTranslationInput>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLegalPage {
    /// When present, the full translation set is replaced.
    pub translations: Option<Vec<LegalPageTranslationInput>>,
}
