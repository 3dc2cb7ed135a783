//! Error types for the persistence core.

use balancer_db::DbError;
use balancer_model::{EntityId, EntityKind, ModelError};
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors surfaced to the calling layer.
///
/// `NotFound`, `AlreadyExists` and `Validation` describe the request; every
/// other variant is a storage fault (see [`StorageError::is_fault`]).
#[derive(Debug, Error)]
pub enum StorageError {
    /// No row with this identifier.
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: EntityId },

    /// A row with this identifier already exists.
    #[error("{kind} {id} already exists")]
    AlreadyExists { kind: EntityKind, id: EntityId },

    /// The entity or configuration violates a precondition.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Database error from the backend.
    #[error("database error: {0}")]
    Database(#[from] DbError),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored row cannot be turned back into an entity.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Configuration could not be read.
    #[error("configuration error: {0}")]
    Config(String),
}

impl StorageError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }

    /// Whether the backend itself failed, as opposed to the request being
    /// rejected.
    #[must_use]
    pub const fn is_fault(&self) -> bool {
        matches!(
            self,
            StorageError::Database(_) | StorageError::Serialization(_) | StorageError::InvalidData(_)
        )
    }
}

impl From<ModelError> for StorageError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Invalid { .. } => StorageError::Validation(err.to_string()),
            ModelError::MalformedExtra(e) => StorageError::Serialization(e),
            ModelError::UnknownVariant { .. } | ModelError::NonFiniteExtra(_) => {
                StorageError::InvalidData(err.to_string())
            }
        }
    }
}

impl From<balancer_types::Error> for StorageError {
    fn from(err: balancer_types::Error) -> Self {
        StorageError::InvalidData(err.to_string())
    }
}
