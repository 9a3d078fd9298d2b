use std::collections::BTreeMap;

/// Domain-level error taxonomy.
///
/// Every variant is an "operational" error: the API layer maps it to a
/// well-defined HTTP status and a structured JSON body. Unexpected failures
/// (database, I/O) are wrapped separately at the API layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Validation failure with a per-field detail map.
    #[error("Validation failed: {message}")]
    ValidationDetails {
        message: String,
        details: BTreeMap<String, String>,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a plain validation failure.
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }
}
