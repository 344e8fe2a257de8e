// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for upload operations.
pub type UploadResult<T> = Result<T, UploadError>;

/// The error type for everything the upload client does.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Invalid base64 payload: {source}")]
    InvalidBase64 {
        #[from]
        source: base64::DecodeError,
    },

    #[error("No file selected")]
    NoFileSelected,

    #[error("Invalid config file {path:?}: {description}")]
    Config { path: PathBuf, description: String },

    #[error("Invalid server URL '{url}'")]
    InvalidServerUrl { url: String },
}

impl UploadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        UploadError::Io {
            path: path.into(),
            source,
        }
    }
}
