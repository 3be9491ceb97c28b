//! Store error types.

use factura_core::document::DocumentError;
use factura_shared::AppError;
use thiserror::Error;

/// Result type alias using `StoreError`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while loading, saving or mutating persisted collections.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing files failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A collection could not be encoded or decoded.
    #[error("collection is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend refused the operation.
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// The requested change was rejected by the document rules.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl StoreError {
    /// Create a backend error.
    #[must_use]
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Returns the error code for presentation and logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "STORAGE_IO",
            Self::Serialization(_) => "STORAGE_SERIALIZATION",
            Self::Backend(_) => "STORAGE_BACKEND",
            Self::Document(err) => err.error_code(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Document(err) => err.into(),
            other => AppError::Storage(other.to_string()),
        }
    }
}
