//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?page=&limit=`).
///
/// `page` is 1-based; `limit` is clamped to `[1, 100]` with a default of 10.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationParams {
    /// Resolve into `(page, limit, offset)` after clamping.
    pub fn resolve(&self) -> (i64, i64, i64) {
        let page = vitrine_db::clamp_page(self.page);
        let limit = vitrine_db::clamp_limit(self.limit);
        (page, limit, (page - 1) * limit)
    }
}

/// Optional `?locale=` filter on translatable resources.
#[derive(Debug, Deserialize)]
pub struct LocaleParams {
    pub locale: Option<String>,
}

impl LocaleParams {
    /// Normalized locale filter, `None` when absent.
    pub fn normalized(&self) -> Option<String> {
        self.locale.as_deref().map(vitrine_core::locale::normalize)
    }
}
