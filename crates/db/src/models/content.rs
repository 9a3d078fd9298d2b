//! Content block entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// Content value kind, mapped to the `content_type` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "content_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Text,
    RichText,
    Html,
    Json,
}

/// Parent content row. The key is immutable after creation.
#[derive(Debug, Clone, FromRow)]
pub struct Content {
    pub id: DbId,
    pub key: String,
    #[sqlx(rename = "type")]
    pub content_type: ContentType,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Per-locale translation row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentTranslation {
    #[serde(skip)]
    pub content_id: DbId,
    pub locale: String,
    pub value: String,
}

/// Content plus its translations, as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponse {
    pub id: DbId,
    pub key: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub translations: Vec<ContentTranslation>,
}

impl ContentResponse {
    pub fn from_parts(parent: Content, translations: Vec<ContentTranslation>) -> Self {
        ContentResponse {
            id: parent.id,
            key: parent.key,
            content_type: parent.content_type,
            created_at: parent.created_at,
            updated_at: parent.updated_at,
            translations,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentTranslationInput {
    pub locale: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateContent {
    pub key: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub translations: Vec<ContentTranslationInput>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContent {
    #[serde(rename = "type")]
    pub content_type: Option<ContentType>,
    /// When present, the full translation set is replaced.
    pub translations: Option<Vec<ContentTranslationInput>>,
}
