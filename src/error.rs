// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::extract::ExtractionFailure;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Malformed input in {path}: {reason}")]
    MalformedInput { path: PathBuf, reason: String },

    #[error("{path}: {failure}")]
    Extraction {
        path: PathBuf,
        failure: ExtractionFailure,
    },

    #[error("Failed to parse {0}")]
    Parse(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Generic error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wraps an I/O error together with the path it concerns.
    #[must_use]
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    #[must_use]
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

// Allow `?` on std::io::Error by converting to Error::Io with unknown path.
impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

// Gracefully convert WalkDir errors
impl From<walkdir::Error> for Error {
    fn from(e: walkdir::Error) -> Self {
        Error::Other(e.to_string())
    }
}
