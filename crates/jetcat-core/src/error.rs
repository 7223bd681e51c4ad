//! Core error types.

use jetcat_types::ObjectKind;
use thiserror::Error;

/// Failure reported by a native driver.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DriverError {
    /// What went wrong.
    pub message: String,
    /// Underlying cause, if the driver has one.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DriverError {
    /// Create a driver error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a driver error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Query execution errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The native driver could not produce the rowset. Not retried.
    #[error("catalog source unavailable for {kind}: {source}")]
    SourceUnavailable {
        kind: ObjectKind,
        #[source]
        source: DriverError,
    },

    /// An internal invariant was broken. This is a defect, not a user error.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

impl Error {
    /// Whether this error came from the native driver.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Error::SourceUnavailable { .. })
    }
}

/// Errors loading a catalog snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Reading the snapshot file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot is not valid JSON of the expected shape.
    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// A top-level key is not a catalog object kind.
    #[error("unknown object kind '{0}' in snapshot")]
    UnknownKind(String),
}
