// Domain Error Types

use std::path::PathBuf;
use thiserror::Error;

use super::job_spec::{Algorithm, HeaderFormat};

/// Rejected before any I/O: the job description itself is invalid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Header format {header} does not match algorithm {algorithm}")]
    HeaderAlgorithmMismatch {
        header: HeaderFormat,
        algorithm: Algorithm,
    },

    #[error("No input paths given")]
    NoInputs,

    #[error("Archive path is empty")]
    MissingArchivePath,

    #[error("Path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("Path has no final component: {}", .0.display())]
    NoFileName(PathBuf),
}

/// Rejected by the existence checks that run before a subprocess is spawned
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreflightError {
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Archive not found: {}", .0.display())]
    ArchiveNotFound(PathBuf),

    #[error("Unsupported archive extension (expected .tar.gz or .tgz): {}", .0.display())]
    UnsupportedArchiveExtension(PathBuf),
}

pub type Result<T> = std::result::Result<T, BuildError>;
