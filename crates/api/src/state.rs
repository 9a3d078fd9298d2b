use std::sync::Arc;

use crate::cache::Cache;
use crate::config::ServerConfig;
use crate::email::Mailer;
use crate::middleware::rate_limit::RateLimiter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vitrine_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// SMTP mailer; `None` when `SMTP_HOST` is not configured.
    pub mailer: Option<Arc<Mailer>>,
    /// Best-effort response cache (Redis or disabled).
    pub cache: Cache,
    /// Per-IP fixed-window request counters.
    pub rate_limiter: Arc<RateLimiter>,
}
