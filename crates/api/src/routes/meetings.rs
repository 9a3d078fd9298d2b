//! Route definitions for the meeting scheduler.

use axum::routing::get;
use axum::Router;

use crate::handlers::meetings;
use crate::state::AppState;

/// Admin routes mounted at `/admin/meetings`. The public booking and
/// availability endpoints are mounted flat in [`super::api_routes`] so the
/// contact rate budget wraps only the booking POST.
///
/// ```text
/// GET    /               -> list
/// GET    /availability   -> list_availability (weekly schedule)
/// PUT    /availability   -> replace_availability
/// GET    /{id}           -> get
/// PATCH  /{id}           -> update
/// DELETE /{id}           -> cancel (soft)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(meetings::list))
        .route(
            "/availability",
            get(meetings::list_availability).put(meetings::replace_availability),
        )
        .route(
            "/{id}",
            get(meetings::get)
                .patch(meetings::update)
                .delete(meetings::cancel),
        )
}
