//! Cookie-consent audit records.

use serde::Serialize;
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// One append-only consent record.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieConsent {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub email: Option<String>,
    pub consent: bool,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

/// Insert DTO; ip/user-agent are filled from the request by the handler.
#[derive(Debug)]
pub struct RecordConsent {
    pub user_id: Option<DbId>,
    pub email: Option<String>,
    pub consent: bool,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
