use filmorate_catalog::Entity;
use thiserror::Error;

use crate::schema::SchemaError;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A referenced record does not exist
    #[error("{entity} with id={id} not found")]
    NotFound { entity: Entity, id: String },

    /// A uniqueness rule would be violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A friendship edge from a user to themselves
    #[error("User {0} cannot befriend themselves")]
    SelfFriendship(i64),

    /// Another thread panicked while holding the store lock
    #[error("Storage lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    pub fn not_found(entity: Entity, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn like_not_found(film_id: i64, user_id: i64) -> Self {
        Self::not_found(Entity::Like, format!("film={film_id},user={user_id}"))
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// True when this is a `NotFound` for the given entity kind.
    pub fn is_not_found(&self, kind: Entity) -> bool {
        matches!(self, Self::NotFound { entity, .. } if *entity == kind)
    }
}
