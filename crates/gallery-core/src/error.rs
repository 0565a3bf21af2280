//! Error types for the gallery core library
//!
//! Validators never fail: they report problems as data inside a
//! [`ValidationResult`](crate::ValidationResult). The variants below cover the
//! remaining failure modes: malformed input, illegal lifecycle transitions,
//! mutations refused by the operation guard, blocked submissions, and errors
//! raised by the external upload and persistence collaborators.

use crate::types::{Operation, UploadStage};
use thiserror::Error;

/// Main error type for gallery operations
#[derive(Error, Debug)]
pub enum Error {
    /// Bounds where the maximum is below the minimum
    #[error("Invalid bounds: maximum {max} is below minimum {min}")]
    InvalidBounds { min: usize, max: usize },

    /// An item that breaks the data model invariants
    #[error("Invalid image item '{identity_key}': {message}")]
    InvalidItem {
        identity_key: String,
        message: String,
    },

    /// Upload lifecycle transition that is not allowed from the current stage
    #[error("Cannot move image '{identity_key}' from {from} to {to}")]
    InvalidTransition {
        identity_key: String,
        from: UploadStage,
        to: &'static str,
    },

    /// No item with the given identity key
    #[error("Image '{identity_key}' not found")]
    ItemNotFound { identity_key: String },

    /// The operation guard refused a mutation
    #[error("{operation} rejected: {}", reasons.join("; "))]
    OperationRejected {
        operation: Operation,
        reasons: Vec<String>,
    },

    /// Submission gate refused to hand the collection to persistence
    #[error("Submission blocked: {}", errors.join("; "))]
    SubmissionBlocked { errors: Vec<String> },

    /// Failure reported by the upload collaborator
    #[error("Upload failed for '{identity_key}': {message}")]
    Upload {
        identity_key: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Failure reported by the persistence collaborator
    #[error("Persistence error: {message}")]
    Persistence {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an upload error without an underlying cause
    pub fn upload(identity_key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Upload {
            identity_key: identity_key.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a persistence error without an underlying cause
    pub fn persistence(message: impl Into<String>) -> Self {
        Error::Persistence {
            message: message.into(),
            source: None,
        }
    }

    /// Messages a form should show the user, if this error carries any
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            Error::OperationRejected { reasons, .. } => reasons.clone(),
            Error::SubmissionBlocked { errors } => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}
