//! Error types shared across Cutline crates.

use std::path::PathBuf;

/// Top-level error type for Cutline operations.
#[derive(Debug, thiserror::Error)]
pub enum CutlineError {
    #[error("Project error: {message}")]
    Project { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Media error: {message}")]
    Media { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using CutlineError.
pub type CutlineResult<T> = Result<T, CutlineError>;

impl CutlineError {
    pub fn project(msg: impl Into<String>) -> Self {
        Self::Project {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
