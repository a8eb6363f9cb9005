//! Error types for loading market breadth data and settings.
//!
//! The transformation layer itself never fails; only the edges that touch
//! the filesystem or parse external input return these errors.

use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum BreadthError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date: {0}")]
    Date(String),

    #[error("Invalid setting {key}: {reason}")]
    Setting { key: String, reason: String },

    #[error("Logger error: {0}")]
    Logger(String),
}

pub type Result<T> = std::result::Result<T, BreadthError>;
