use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Opening or querying the catalog database failed
    #[error("Database error: {0}")]
    Database(String),

    /// A catalog operation was rejected
    #[error("{0}")]
    Service(#[from] filmorate_service::ServiceError),

    /// Reference data could not be loaded
    #[error("Reference data error: {0}")]
    Reference(#[from] filmorate_catalog::YamlError),

    /// A fixture cross reference names a record the fixture does not contain
    #[error("Fixture refers to {entity} {id}, which it does not define")]
    UnknownFixtureId {
        entity: filmorate_catalog::Entity,
        id: i64,
    },

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }
}
