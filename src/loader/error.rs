//! Error types for loading process lists.

use crate::model::ProcessId;
use std::path::PathBuf;
use thiserror::Error;

/// The process list could not be read at all. Fatal: no simulation runs.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Error reading processes file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Why a single record was skipped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected at least 5 columns, found {0}")]
    TooFewColumns(usize),

    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("process id must be positive")]
    ZeroId,

    #[error("unknown role {0:?}")]
    UnknownRole(String),

    #[error("duplicate process id {0}")]
    DuplicateId(ProcessId),
}
