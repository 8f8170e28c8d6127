//! Error types for orrery
//!
//! This module provides structured error handling using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for orrery operations
pub type Result<T> = std::result::Result<T, OrreryError>;

/// Errors that can occur while analysing alignments and clocks
#[derive(Error, Debug)]
pub enum OrreryError {
    /// A clock string did not match `H:MM` / `HH:MM` (hour 0-23, minute 0-59)
    #[error("Invalid time format: {input:?}")]
    InvalidTimeFormat { input: String },

    /// IO error while reading config or writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file given explicitly but missing
    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<OrreryError>,
    },
}

impl OrreryError {
    /// Create a time format error for the given input
    pub fn invalid_time(input: impl Into<String>) -> Self {
        OrreryError::InvalidTimeFormat {
            input: input.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        OrreryError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        OrreryError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// True when this is (or wraps) a time format error
    pub fn is_format_error(&self) -> bool {
        match self {
            OrreryError::InvalidTimeFormat { .. } => true,
            OrreryError::WithContext { source, .. } => source.is_format_error(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}
