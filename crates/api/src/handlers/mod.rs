//! HTTP handlers, one module per resource.

pub mod auth;
pub mod consent;
pub mod content;
pub mod gdpr;
pub mod leads;
pub mod legal;
pub mod links;
pub mod meetings;
pub mod testimonials;

use std::collections::HashSet;

use vitrine_core::error::CoreError;
use vitrine_core::locale;

use crate::error::AppError;

/// Normalize a translation set's locales in place, rejecting malformed or
/// duplicate ones. Emptiness is checked separately at each call site so the
/// message can name the resource.
pub(crate) fn normalize_locales<'a>(
    locales: impl Iterator<Item = &'a mut String>,
) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for loc in locales {
        let normalized = locale::parse(loc)?;
        if !seen.insert(normalized.clone()) {
            return Err(AppError::Core(CoreError::validation(format!(
                "Duplicate locale: {normalized}"
            ))));
        }
        *loc = normalized;
    }
    Ok(())
}
