//! Locale code normalization.
//!
//! Translatable entities store their per-language variants keyed by an
//! uppercase locale code (`EN`, `FR`, `PT-BR`, ...). Input is accepted in
//! any case and normalized before it reaches the database.

use crate::error::CoreError;

/// Locale applied when a public submission does not specify one.
pub const DEFAULT_LOCALE: &str = "EN";

/// Normalize a locale code to its canonical uppercase form.
pub fn normalize(locale: &str) -> String {
    locale.trim().to_uppercase()
}

/// Normalize and validate a locale code.
///
/// Accepts 2 to 5 characters of ASCII letters and an optional single hyphen
/// (`EN`, `PT-BR`). Anything else is a validation failure.
pub fn parse(locale: &str) -> Result<String, CoreError> {
    let normalized = normalize(locale);
    let valid = (2..=5).contains(&normalized.len())
        && normalized.chars().all(|c| c.is_ascii_uppercase() || c == '-')
        && normalized.chars().filter(|c| *c == '-').count() <= 1
        && !normalized.starts_with('-')
        && !normalized.ends_with('-');
    if !valid {
        return Err(CoreError::validation(format!(
            "Invalid locale code: {locale:?}"
        )));
    }
    Ok(normalized)
}
