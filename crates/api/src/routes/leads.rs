//! Route definitions for the lead pipeline.

use axum::routing::get;
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// Admin routes mounted at `/admin/leads`. The public submission endpoint
/// is mounted flat in [`super::api_routes`] so the contact rate budget can
/// wrap it alone.
///
/// ```text
/// GET    /          -> list
/// GET    /export    -> export_csv
/// GET    /{id}      -> get
/// PATCH  /{id}      -> update_status
/// DELETE /{id}      -> delete
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(leads::list))
        .route("/export", get(leads::export_csv))
        .route(
            "/{id}",
            get(leads::get)
                .patch(leads::update_status)
                .delete(leads::delete),
        )
}
