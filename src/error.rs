//! Errors produced while rendering

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong inside a render call
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template missing: {0}")]
    TemplateMissing(String),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Write(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl RenderError {
    /// Wrap an IO error with the path being read
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RenderError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
