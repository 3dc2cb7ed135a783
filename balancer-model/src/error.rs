//! Error types for the entity model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while validating, encoding or decoding entity data.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A stored enumeration value is not one of the known variants.
    #[error("unknown {field} value: {value:?}")]
    UnknownVariant { field: &'static str, value: String },

    /// The extra-attribute column is not a JSON object of scalars.
    #[error("malformed extra attributes: {0}")]
    MalformedExtra(#[from] serde_json::Error),

    /// A float in the extra bag cannot be represented in JSON.
    #[error("extra attribute {0:?} holds a non-finite number")]
    NonFiniteExtra(String),

    /// The record violates a precondition for persistence.
    #[error("invalid {kind}: {reason}")]
    Invalid { kind: &'static str, reason: String },
}
