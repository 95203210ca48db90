//! Error types for procedure data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of an [`IngestError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The resource could not be fetched.
    Load,
    /// The resource was fetched but could not be tokenized as CSV.
    Parse,
}

/// Errors that can occur while loading and parsing a CSV resource.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Load Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Resource exceeds the size limit.
    #[error("{origin} is too large ({size} bytes, limit {max_size} bytes)")]
    FileTooLarge {
        origin: String,
        size: u64,
        max_size: u64,
    },

    /// Server answered with a non-success status.
    #[error("could not load {url}: HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    /// Request failed before a response was received.
    #[error("network error while loading {url}: {message}")]
    Network { url: String, message: String },

    // === Parse Errors ===
    /// Resource uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {origin} (expected UTF-8)")]
    UnsupportedEncoding {
        origin: String,
        encoding: &'static str,
    },

    /// CSV tokenizer rejected the content.
    #[error("failed to parse CSV {origin}: {message}")]
    CsvParse { origin: String, message: String },
}

impl IngestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. }
            | Self::FileRead { .. }
            | Self::FileTooLarge { .. }
            | Self::HttpStatus { .. }
            | Self::Network { .. } => ErrorKind::Load,
            Self::UnsupportedEncoding { .. } | Self::CsvParse { .. } => ErrorKind::Parse,
        }
    }

    /// Maps an I/O error on `path` to the matching variant.
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
