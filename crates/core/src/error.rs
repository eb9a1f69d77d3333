// Central Error Type for the Application

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum QzipError {
    #[error("Invalid job: {0}")]
    Build(#[from] crate::domain::BuildError),

    #[error("Preflight check failed: {0}")]
    Preflight(#[from] crate::domain::PreflightError),

    #[error("Execution error: {0}")]
    Execution(#[from] crate::port::ExecError),

    #[error("Cannot switch working directory to {}: {source}", .path.display())]
    WorkingDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl QzipError {
    /// Tool output captured before the failure, if any
    pub fn tool_output(&self) -> Option<&str> {
        match self {
            QzipError::Execution(e) => Some(e.combined_output()).filter(|s| !s.is_empty()),
            _ => None,
        }
    }
}

/// Result type alias using QzipError
pub type Result<T> = std::result::Result<T, QzipError>;
