//! Error types and handling for the JavaScript stripper

use std::{io, path::PathBuf, result::Result as StdResult};

use thiserror::Error;

/// Custom result type for stripping operations
pub type Result<T> = StdResult<T, Error>;

/// Core error type for stripping operations
#[derive(Error, Debug)]
#[non_exhaustive]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("PDF load error: {0}")]
    PdfLoadError(#[from] lopdf::Error),

    #[error("Cleaner error: {0}")]
    CleanerError(#[from] CleanerError),

    #[error("Output error for {path}: {message}")]
    OutputError { path: PathBuf, message: String },

    #[error("Report error: {0}")]
    ReportError(String),

    #[error("Directory walk error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl Error {
    /// Helper for creating an `OutputError` bound to a path
    pub fn output(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Error::OutputError {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::IoError(err.error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ReportError(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::ReportError(err.to_string())
    }
}

// -------------------- Sub-Error Categories --------------------

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CleanerError {
    #[error("Document has no catalog")]
    MissingCatalog,

    #[error("Catalog is not a dictionary: {0}")]
    InvalidCatalog(String),

    #[error("Saving cleaned document failed: {0}")]
    SaveError(String),
}
