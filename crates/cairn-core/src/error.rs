//! Error types for the plan store.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying storage operation failed (connection, constraint, syntax)
    #[error("Persistence error: {message}")]
    Persistence {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// A row was read but does not satisfy the expected shape or invariants.
    /// Signals corruption or a schema mismatch, never a caller error.
    #[error("Integrity error: {message}")]
    Integrity { message: String },
    /// The caller requested a transition the step state machine forbids
    #[error("Precondition failed: {message}")]
    Precondition { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Blocking task failures in the async facade
    #[error("Runtime error: {message}")]
    Runtime { message: String },
}

impl StoreError {
    /// Creates a persistence error with a message and its rusqlite source.
    pub fn persistence(message: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Persistence {
            message: message.into(),
            source,
        }
    }

    /// Creates an integrity error for a row that failed shape validation.
    pub fn integrity(message: impl Into<String>) -> Self {
        Self::Integrity {
            message: message.into(),
        }
    }

    /// Creates a precondition error for a forbidden state transition.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// Classifies an error raised while fetching and decoding a row.
    ///
    /// Conversion failures mean the row was read but did not have the
    /// expected shape, which is an integrity problem; everything else is a
    /// storage failure.
    pub(crate) fn decode(entity: &str, source: rusqlite::Error) -> Self {
        match source {
            rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::IntegralValueOutOfRange(..) => {
                Self::integrity(format!("{entity} row failed shape validation: {source}"))
            }
            other => Self::persistence(format!("Failed to fetch {entity} row"), other),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| StoreError::persistence(message, e))
    }
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
