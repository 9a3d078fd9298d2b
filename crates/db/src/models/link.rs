//! Social and external link models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// Social-network link (footer icons).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub id: DbId,
    pub platform: String,
    pub url: String,
    #[serde(rename = "order")]
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// External resource link (partner sites, documentation, ...).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalLink {
    pub id: DbId,
    pub label: String,
    pub url: String,
    #[serde(rename = "order")]
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSocialLink {
    pub platform: String,
    pub url: String,
    #[serde(rename = "order", default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSocialLink {
    pub platform: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "order")]
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExternalLink {
    pub label: String,
    pub url: String,
    #[serde(rename = "order", default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExternalLink {
    pub label: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "order")]
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

fn default_active() -> bool {
    true
}
