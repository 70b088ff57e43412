use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the raw datasets.
///
/// Row-level parse problems are not errors; they are quarantined during
/// ingest and reported separately. `SomnaError` covers the failures that
/// make a whole dataset unusable.
#[derive(Debug, Error)]
pub enum SomnaError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{}: missing required column {column}", path.display())]
    MissingColumn { path: PathBuf, column: String },
    #[error("{}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, SomnaError>;
