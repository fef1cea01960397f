//! Error taxonomy for task-store operations.
//!
//! There is no retry logic anywhere in this crate: a rename failure means an
//! external condition (permissions, concurrent deletion) that the user must
//! resolve, so every error propagates to the caller unchanged.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for task-store operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The named file does not exist (or is not a regular file).
    #[error("no such task file: {path}")]
    NotFound { path: PathBuf },

    /// A tag removal targeted a tag the task does not carry.
    #[error("tag not present: {tag}")]
    TagNotFound { tag: String },

    /// A priority key that is neither a shorthand (`1`..`6`, `inbox`) nor a
    /// full token (`1-now`..`6-waiting`).
    #[error("unknown priority: {input:?}")]
    InvalidPriority { input: String },

    /// A rename or move could not complete. The in-memory record still
    /// reflects the name that is actually on disk.
    #[error("failed to rename {from} -> {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    /// Filesystem I/O other than renames (reads, scans, file creation).
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file exists but could not be parsed.
    #[error("invalid config at {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
