//! ClipIQ Error Types
//!
//! Centralized error handling for the clipboard assistant.

use thiserror::Error;

/// Central error type for ClipIQ
#[derive(Error, Debug)]
pub enum ClipError {
    #[error("Model error: {0}")]
    Model(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Directive validation error: {0}")]
    Directive(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for ClipIQ operations
pub type ClipResult<T> = Result<T, ClipError>;
