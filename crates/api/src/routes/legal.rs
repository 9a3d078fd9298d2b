//! Route definitions for legal pages.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::legal;
use crate::state::AppState;

/// Public routes mounted at `/legal`.
///
/// ```text
/// GET /         -> list_public (paginated, ?locale)
/// GET /{slug}   -> get_public
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(legal::list_public))
        .route("/{slug}", get(legal::get_public))
}

/// Admin routes mounted at `/admin/legal`.
///
/// ```text
/// POST   /         -> create
/// PUT    /{slug}   -> update
/// DELETE /{slug}   -> delete
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(legal::create))
        .route("/{slug}", put(legal::update).delete(legal::delete))
}
