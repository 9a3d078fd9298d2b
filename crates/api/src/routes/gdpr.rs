//! Route definitions for GDPR self-service.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::gdpr;
use crate::state::AppState;

/// Routes mounted at `/gdpr` (authenticated users, any role).
///
/// ```text
/// GET    /export  -> export (all stored data for the caller)
/// DELETE /delete  -> delete (erasure + anonymization)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export", get(gdpr::export))
        .route("/delete", delete(gdpr::delete))
}
