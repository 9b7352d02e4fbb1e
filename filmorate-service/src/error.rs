use filmorate_catalog::{Entity, ValidationError};
use filmorate_db::StorageError;
use thiserror::Error;

/// Failures surfaced to callers of the catalog services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed input, rejected before any write
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{entity} with id={id} not found")]
    NotFound { entity: Entity, id: String },

    /// A uniqueness rule would be violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Backend failure not caused by the caller's input
    #[error("Internal error: {0}")]
    Internal(#[source] StorageError),
}

impl ServiceError {
    pub fn not_found(entity: Entity, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self, kind: Entity) -> bool {
        matches!(self, Self::NotFound { entity, .. } if *entity == kind)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => Self::NotFound { entity, id },
            StorageError::Conflict(msg) => Self::Conflict(msg),
            StorageError::SelfFriendship(id) => {
                Self::Validation(ValidationError::SelfFriendship(id))
            }
            other => Self::Internal(other),
        }
    }
}

/// Turn an absent lookup into `NotFound`.
pub(crate) fn require<T>(found: Option<T>, entity: Entity, id: i64) -> Result<T, ServiceError> {
    found.ok_or_else(|| ServiceError::not_found(entity, id))
}
