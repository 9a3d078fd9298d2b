//! Route definitions for translatable content blocks.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Public routes mounted at `/content`.
///
/// ```text
/// GET /        -> list_public (?locale, paginated)
/// GET /{key}   -> get_public
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(content::list_public))
        .route("/{key}", get(content::get_public))
}

/// Admin routes mounted at `/admin/content`.
///
/// ```text
/// POST   /        -> create
/// PUT    /{key}   -> update
/// DELETE /{key}   -> delete
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(content::create))
        .route("/{key}", put(content::update).delete(content::delete))
}
