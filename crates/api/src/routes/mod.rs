pub mod auth;
pub mod consent;
pub mod content;
pub mod gdpr;
pub mod health;
pub mod leads;
pub mod legal;
pub mod links;
pub mod meetings;
pub mod testimonials;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::middleware::{cache, rate_limit};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Takes the shared state so the per-budget rate limiters and the response
/// cache can be attached as scoped layers; the returned router still needs
/// `.with_state(state)` from the caller.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      login (public, auth budget)
/// /auth/refresh                    refresh (public, auth budget)
/// /auth/logout                     logout
/// /auth/me                         current user (requires auth)
/// /auth/change-password            change password (requires auth)
///
/// /leads                           submit lead (public, contact budget)
/// /meetings                        book meeting (public, contact budget)
/// /meetings/availability           bookable slots (public)
/// /consent                         record cookie consent (public)
///
/// /content                         list content blocks (public, cached)
/// /content/{key}                   get content block (public, cached)
/// /testimonials                    active testimonials (public, cached)
/// /legal                           list legal pages (public, cached)
/// /legal/{slug}                    get legal page (public, cached)
/// /links/social                    active social links (public, cached)
/// /links/external                  active external links (public, cached)
///
/// /admin/leads                     list, export, get, patch, delete (admin)
/// /admin/meetings                  list, get, patch, cancel (admin)
/// /admin/meetings/availability     get, replace weekly schedule (admin)
/// /admin/content                   create, update, delete (editor)
/// /admin/testimonials              full CRUD + reorder (editor)
/// /admin/legal                     create, update, delete (editor)
/// /admin/links                     full CRUD, social + external (editor)
/// /admin/consent                   consent history (admin)
///
/// /gdpr/export                     export caller's data (requires auth)
/// /gdpr/delete                     erase caller's data (requires auth)
/// ```
pub fn api_routes(state: &AppState) -> Router<AppState> {
    let auth_guard = from_fn_with_state(state.clone(), rate_limit::auth_limit);
    let contact_guard = from_fn_with_state(state.clone(), rate_limit::contact_limit);
    let public_guard = from_fn_with_state(state.clone(), rate_limit::public_limit);
    let page_cache = from_fn_with_state(state.clone(), cache::cache_public_get);

    // Read-mostly public resources share the response cache.
    let cached_public = Router::new()
        .nest("/content", content::public_router())
        .nest("/testimonials", testimonials::public_router())
        .nest("/legal", legal::public_router())
        .nest("/links", links::public_router())
        .layer(page_cache);

    let admin = Router::new()
        .nest("/leads", leads::admin_router())
        .nest("/meetings", meetings::admin_router())
        .nest("/content", content::admin_router())
        .nest("/testimonials", testimonials::admin_router())
        .nest("/legal", legal::admin_router())
        .nest("/links", links::admin_router())
        .nest("/consent", consent::admin_router());

    Router::new()
        // Authentication (stricter budget against credential stuffing).
        .nest("/auth", auth::router().layer(auth_guard))
        // Public form submissions (contact budget).
        .route(
            "/leads",
            post(handlers::leads::create).layer(contact_guard.clone()),
        )
        .route(
            "/meetings",
            post(handlers::meetings::book).layer(contact_guard),
        )
        .route(
            "/meetings/availability",
            get(handlers::meetings::get_availability),
        )
        // Cookie consent (append-only, public).
        .nest("/consent", consent::public_router())
        // Cached public content.
        .merge(cached_public)
        // Admin surface (role checks happen in the handlers).
        .nest("/admin", admin)
        // GDPR self-service for any authenticated account.
        .nest("/gdpr", gdpr::router())
        // Baseline per-IP budget over everything above.
        .layer(public_guard)
}
