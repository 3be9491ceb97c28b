//! Document error types.
//!
//! Every variant is a typed result for the caller to present. None of them
//! is fatal: a missing reference is rendered with an "N/A" fallback by the UI.

use factura_shared::AppError;
use thiserror::Error;

use crate::document::status::{DocumentKind, RecordKind};

/// Errors that can occur during document operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Referenced record does not exist.
    #[error("{kind} {id} not found")]
    NotFound {
        /// The kind of record looked up.
        kind: RecordKind,
        /// The id or number that was looked up.
        id: String,
    },

    /// Attempted a status change the lifecycle does not allow.
    #[error("Invalid {kind} status transition from {from} to {to}")]
    InvalidTransition {
        /// The document kind.
        kind: DocumentKind,
        /// The current status.
        from: &'static str,
        /// The attempted target status.
        to: &'static str,
    },

    /// Input rejected before any state was changed.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl DocumentError {
    /// Builds a `NotFound` error for any displayable id.
    pub fn not_found(kind: RecordKind, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Returns the error code for presentation and logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::NotFound { .. } => Self::NotFound(err.to_string()),
            DocumentError::InvalidTransition { .. } => Self::InvalidTransition(err.to_string()),
            DocumentError::Validation(msg) => Self::Validation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = DocumentError::not_found(RecordKind::Invoice, "FAC-2024-003");
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "invoice FAC-2024-003 not found");
    }

    #[test]
    fn test_invalid_transition_error() {
        let err = DocumentError::InvalidTransition {
            kind: DocumentKind::Quote,
            from: "sent",
            to: "archived",
        };
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("sent"));
        assert!(err.to_string().contains("archived"));
    }

    #[test]
    fn test_converts_into_app_error() {
        let app: AppError = DocumentError::not_found(RecordKind::Client, "c1").into();
        assert_eq!(app.error_code(), "NOT_FOUND");

        let app: AppError = DocumentError::Validation("client is required".into()).into();
        assert_eq!(app.to_string(), "Validation error: client is required");
    }
}
