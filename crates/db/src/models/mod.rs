//! Entity models and request/response DTOs.
//!
//! Row structs derive `FromRow`; response DTOs serialize in camelCase to
//! match the public JSON API. Translatable entities pair a parent row with
//! child translation rows keyed by locale.

pub mod availability;
pub mod consent;
pub mod content;
pub mod lead;
pub mod legal_page;
pub mod link;
pub mod meeting;
pub mod testimonial;
pub mod user;
