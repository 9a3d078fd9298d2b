//! Testimonial entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// Parent testimonial row (display rank + active flag).
#[derive(Debug, Clone, FromRow)]
pub struct Testimonial {
    pub id: DbId,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Per-locale translation row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TestimonialTranslation {
    #[serde(skip)]
    pub testimonial_id: DbId,
    pub locale: String,
    pub name: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub content: String,
}

/// Testimonial plus its translations, as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialResponse {
    pub id: DbId,
    #[serde(rename = "order")]
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub translations: Vec<TestimonialTranslation>,
}

impl TestimonialResponse {
    pub fn from_parts(parent: Testimonial, translations: Vec<TestimonialTranslation>) -> Self {
        TestimonialResponse {
            id: parent.id,
            display_order: parent.display_order,
            is_active: parent.is_active,
            created_at: parent.created_at,
            updated_at: parent.updated_at,
            translations,
        }
    }
}

/// Translation payload on create/update.
#[derive(Debug, Clone, Deserialize)]
pub struct TestimonialTranslationInput {
    pub locale: String,
    pub name: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimonial {
    #[serde(rename = "order", default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub translations: Vec<TestimonialTranslationInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestimonial {
    #[serde(rename = "order")]
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
    /// When present, the full translation set is replaced.
    pub translations: Option<Vec<TestimonialTranslationInput>>,
}

fn default_active() -> bool {
    true
}
