//! Error types for the devto library
//!
//! Every fallible operation returns [`DevtoError`]. The variants fall into the
//! kinds callers care about: reading the article (I/O), decoding its front
//! matter (parse), encoding it back (encode), and the glue around the core
//! (article config, submission, validation).

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum DevtoError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Front matter could not be serialized back to YAML
    #[error("failed to encode front matter: {0}")]
    Encode(#[from] serde_yaml::Error),

    /// JSON serialization of a submission payload failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Article file does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Article file exists but cannot be read
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Front matter block is malformed or has mistyped fields
    #[error("Invalid front matter in {path}: {reason}")]
    InvalidFrontMatter { path: PathBuf, reason: String },

    /// Per-article config file is malformed
    #[error("Invalid article config {path}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    /// The remote collaborator rejected or failed an article submission
    #[error("Submission failed: {reason}")]
    Submission { reason: String },

    /// Operation not supported
    #[error("Operation not supported: {operation}")]
    NotSupported { operation: String },

    /// Generic validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DevtoError>;

impl DevtoError {
    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    /// Create a new invalid front matter error
    pub fn invalid_front_matter(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidFrontMatter {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid config error
    pub fn invalid_config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new submission error
    pub fn submission(reason: impl Into<String>) -> Self {
        Self::Submission {
            reason: reason.into(),
        }
    }

    /// Create a new not supported error
    pub fn not_supported(operation: impl Into<String>) -> Self {
        Self::NotSupported {
            operation: operation.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether retrying the same call could succeed.
    ///
    /// The core never retries; this only informs the caller.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(io_err) => !matches!(
                io_err.kind(),
                std::io::ErrorKind::NotFound
                    | std::io::ErrorKind::PermissionDenied
                    | std::io::ErrorKind::InvalidData
            ),
            Self::Submission { .. } => true,
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::InvalidFrontMatter { .. }
            | Self::InvalidConfig { .. }
            | Self::Encode(_)
            | Self::Json(_)
            | Self::NotSupported { .. }
            | Self::Validation { .. } => false,
        }
    }
}
