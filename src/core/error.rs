//! Error types for the readme-survey library.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Result type alias using readme-survey's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while surveying a corpus.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The corpus manifest could not be read or decoded.
    #[error("Invalid manifest {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    /// A manifest entry has no README available.
    #[error("Missing README for {repository} ({reason})")]
    MissingDocument {
        repository: String,
        reason: MissReason,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV report writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Wrong command-line invocation.
    #[error("Invalid invocation: {0}")]
    InvalidInvocation(String),
}

impl Error {
    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new manifest error.
    pub fn manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a missing-document error.
    pub fn missing_document(repository: impl Into<String>, reason: MissReason) -> Self {
        Self::MissingDocument {
            repository: repository.into(),
            reason,
        }
    }
}

/// Why a manifest entry produced no document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissReason {
    /// The downloader recorded that the repository has no README.
    ConfirmedAbsent,
    /// Nothing was ever fetched for the repository.
    NotFetched,
    /// A README exists but could not be read as text.
    Unreadable,
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MissReason::ConfirmedAbsent => "confirmed absent",
            MissReason::NotFetched => "not fetched",
            MissReason::Unreadable => "unreadable",
        };
        f.write_str(label)
    }
}
