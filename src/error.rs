//! Error types and handling infrastructure for rltable.
//!
//! The parse/highlight/cache pipeline never fails: unparsable lines, broken
//! patterns and broken conditions all degrade locally. The errors defined here
//! cover the outer edges instead: opening and re-reading log files, loading
//! format files, and driving the terminal.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rltable operations.
#[derive(Error, Debug)]
pub enum RltableError {
    /// File system related errors (file not found, permission denied, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found specifically (common case for user feedback)
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file
    #[error("Path is not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// A highlight condition definition failed to compile
    #[error("Invalid condition `{definition}`: {reason}")]
    InvalidCondition { definition: String, reason: String },

    /// Format file is malformed or refers to unknown columns/colors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },
}

/// Standard Result type for rltable operations.
pub type Result<T> = std::result::Result<T, RltableError>;

impl RltableError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create an InvalidCondition error
    pub fn invalid_condition(definition: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCondition {
            definition: definition.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }
}

// Automatic conversion from io::Error to RltableError
impl From<std::io::Error> for RltableError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_messages() {
        let path = PathBuf::from("/test/file.log");

        let file_not_found = RltableError::FileNotFound { path: path.clone() };
        assert_eq!(file_not_found.to_string(), "File not found: /test/file.log");

        let not_a_file = RltableError::NotAFile { path };
        assert_eq!(
            not_a_file.to_string(),
            "Path is not a regular file: /test/file.log"
        );

        let condition = RltableError::invalid_condition("?? x", "unknown operator");
        assert_eq!(
            condition.to_string(),
            "Invalid condition `?? x`: unknown operator"
        );
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(
            RltableError::config("bad toml"),
            RltableError::ConfigError { .. }
        ));
        assert!(matches!(
            RltableError::ui("Terminal resize failed"),
            RltableError::UIError { .. }
        ));
        assert!(matches!(
            RltableError::invalid_condition("~ [", "unclosed class"),
            RltableError::InvalidCondition { .. }
        ));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: RltableError = io_err.into();

        match err {
            RltableError::FileError { message, .. } => {
                assert_eq!(message, "File not found");
            }
            _ => panic!("Expected FileError variant"),
        }
    }
}
