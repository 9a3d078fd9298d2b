//! Route definitions for social and external links.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::links;
use crate::state::AppState;

/// Public routes mounted at `/links`.
///
/// ```text
/// GET /social     -> list_social_public (active only)
/// GET /external   -> list_external_public (active only)
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/social", get(links::list_social_public))
        .route("/external", get(links::list_external_public))
}

/// Admin routes mounted at `/admin/links`.
///
/// ```text
/// GET    /social          -> list_social
/// POST   /social          -> create_social
/// PUT    /social/{id}     -> update_social
/// DELETE /social/{id}     -> delete_social
/// GET    /external        -> list_external
/// POST   /external        -> create_external
/// PUT    /external/{id}   -> update_external
/// DELETE /external/{id}   -> delete_external
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/social", get(links::list_social).post(links::create_social))
        .route(
            "/social/{id}",
            put(links::update_social).delete(links::delete_social),
        )
        .route(
            "/external",
            get(links::list_external).post(links::create_external),
        )
        .route(
            "/external/{id}",
            put(links::update_external).delete(links::delete_external),
        )
}
