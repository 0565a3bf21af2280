//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from gallery-core library
    #[error("{0}")]
    Core(#[from] gallery_core::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Invalid file format
    #[error("Invalid file format for {}: expected {} ({})", path.display(), expected, reason)]
    InvalidFormat {
        path: PathBuf,
        expected: String,
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument combination
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// Bounds profile not defined in the configuration
    #[error("Profile '{}' not found", name)]
    UnknownProfile { name: String },

    /// One or more galleries failed real-time validation
    #[error("Validation failed for {} gallery document(s)", documents)]
    ValidationFailed { documents: usize },

    /// The operation guard refused the operation
    #[error("Operation '{}' not allowed: {}", operation, reason)]
    OperationRejected { operation: String, reason: String },

    /// The submission gate refused the gallery
    #[error("Submission blocked: {}", reason)]
    SubmissionBlocked { reason: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(_) => 2,
            Self::FileNotFound { .. } => 3,
            Self::InvalidFormat { .. } => 4,
            Self::Config(_) => 5,
            Self::InvalidArgs(_) => 6,
            Self::UnknownProfile { .. } => 7,
            Self::ValidationFailed { .. } => 8,
            Self::OperationRejected { .. } => 9,
            Self::SubmissionBlocked { .. } => 10,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::TomlDe(_) | Self::TomlSer(_) => 14,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_))
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_for_gates() {
        let validation = Error::ValidationFailed { documents: 2 };
        let submission = Error::SubmissionBlocked {
            reason: "1 image(s) not uploaded yet".to_string(),
        };
        assert_ne!(validation.exit_code(), submission.exit_code());
        assert_ne!(validation.exit_code(), 0);
    }

    #[test]
    fn test_core_errors_display_unwrapped() {
        let err: Error = gallery_core::Error::InvalidBounds { min: 6, max: 2 }.into();
        assert_eq!(err.to_string(), "Invalid bounds: maximum 2 is below minimum 6");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_format_error_plain() {
        let err = Error::UnknownProfile {
            name: "villa".to_string(),
        };
        assert_eq!(format_error(&err, false), "Error: Profile 'villa' not found");
        assert!(!err.should_show_help());
        assert!(Error::invalid_args("--min without a value").should_show_help());
    }
}
