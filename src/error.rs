//! Error types for devcheck operations.
//!
//! This module defines [`DevcheckError`], the error type returned by the
//! fallible edges of the tool (manifest loading and CLI plumbing), and a
//! [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Individual checks never return errors. A missing binary, a timed out
//!   probe or an unreadable shell config file becomes a check status.
//! - Use `DevcheckError` for configuration problems that stop a run before
//!   any check executes.
//! - Use `anyhow::Error` (via `DevcheckError::Other`) for unexpected errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for devcheck operations.
#[derive(Debug, Error)]
pub enum DevcheckError {
    /// Manifest file not found at the requested location.
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Failed to parse a manifest file.
    #[error("Failed to parse manifest at {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// Manifest parsed but contains invalid entries.
    #[error("Invalid manifest: {message}")]
    ManifestValidation { message: String },

    /// The home directory could not be determined.
    #[error("Could not determine the home directory (is $HOME set?)")]
    HomeNotFound,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DevcheckError {
    /// Whether this error stems from configuration rather than the environment.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ManifestNotFound { .. }
                | Self::ManifestParse { .. }
                | Self::ManifestValidation { .. }
        )
    }
}

/// Result type alias for devcheck operations.
pub type Result<T> = std::result::Result<T, DevcheckError>;
