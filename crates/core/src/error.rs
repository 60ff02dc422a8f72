//! Error types surfaced by persistence and reporting.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::codec::DecodeError;

/// Failure while saving, loading or reporting a train.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested train file does not exist.
    #[error("train file {} not found", path.display())]
    NotFound {
        /// File that was requested.
        path: PathBuf,
    },

    /// The file exists but does not describe a train.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// File being decoded.
        path: PathBuf,
        /// What was wrong with its content.
        source: DecodeError,
    },

    /// Reading or writing the file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// The spreadsheet writer rejected the report.
    #[error("failed to write report {}: {source}", path.display())]
    Report {
        /// Destination of the report.
        path: PathBuf,
        /// Underlying writer error.
        source: rust_xlsxwriter::XlsxError,
    },
}

impl StoreError {
    /// Classify a read failure; a missing file becomes [`StoreError::NotFound`].
    pub(crate) fn from_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::NotFound { path }
        } else {
            StoreError::Io { path, source }
        }
    }

    /// Path of the file the error relates to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            StoreError::NotFound { path }
            | StoreError::Parse { path, .. }
            | StoreError::Io { path, .. }
            | StoreError::Report { path, .. } => path,
        }
    }
}
