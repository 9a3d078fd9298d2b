//! Route definitions for testimonials.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::testimonials;
use crate::state::AppState;

/// Public routes mounted at `/testimonials`.
///
/// ```text
/// GET /  -> list_public (active only, ?locale)
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/", get(testimonials::list_public))
}

/// Admin routes mounted at `/admin/testimonials`.
///
/// ```text
/// GET    /              -> list (paginated, inactive included)
/// POST   /              -> create
/// GET    /{id}          -> get
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// PATCH  /{id}/order    -> update_order
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(testimonials::list).post(testimonials::create))
        .route(
            "/{id}",
            get(testimonials::get)
                .put(testimonials::update)
                .delete(testimonials::delete),
        )
        .route("/{id}/order", patch(testimonials::update_order))
}
