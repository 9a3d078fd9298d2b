//! Request middleware: authentication extractors, RBAC, CSRF protection,
//! rate limiting, response caching, and request-id stamping.
//!
//! - [`auth::AuthUser`] -- extracts the authenticated user from the
//!   `access_token` cookie or a Bearer token.
//! - [`rbac::RequireAdmin`] / [`rbac::RequireEditor`] -- role gates.
//! - [`csrf`] -- double-submit CSRF issuance and enforcement.
//! - [`rate_limit`] -- fixed-window per-IP budgets.
//! - [`cache`] -- best-effort response cache for public GET routes.
//! - [`request_id`] -- stamps `requestId` into JSON error bodies.

pub mod auth;
pub mod cache;
pub mod csrf;
pub mod rate_limit;
pub mod rbac;
pub mod request_id;
