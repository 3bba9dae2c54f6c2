//! Error types for the Shelf engine.

use thiserror::Error;

/// All possible errors from the Shelf engine.
///
/// `MissingParameter` and `NotFound` are ordinary outcomes that callers are
/// expected to render. The remaining variants are fatal: the store never
/// recovers from them and simply hands them back up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Lookup errors
    #[error("id is a required parameter")]
    MissingParameter,

    #[error("{entity} with id {id} not found")]
    NotFound { entity: String, id: String },

    // Fatal errors
    #[error("corrupt collection data: {0}")]
    Corrupt(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization failed: {0}")]
    Serialize(String),

    #[error("no ids left to assign")]
    IdsExhausted,
}

impl Error {
    /// Build a not-found error for an entity and the id as the caller gave it.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Whether the error indicates broken storage rather than a bad request.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Corrupt(_) | Error::Storage(_) | Error::Serialize(_) | Error::IdsExhausted
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
