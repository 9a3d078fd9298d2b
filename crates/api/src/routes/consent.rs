//! Route definitions for cookie-consent records.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::consent;
use crate::state::AppState;

/// Public routes mounted at `/consent`.
///
/// ```text
/// POST /  -> record (append-only)
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/", post(consent::record))
}

/// Admin routes mounted at `/admin/consent`.
///
/// ```text
/// GET /  -> history (?email filters, otherwise paginated)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/", get(consent::history))
}
