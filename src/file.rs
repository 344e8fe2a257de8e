// src/file.rs

use std::path::PathBuf;

use crate::error::{UploadError, UploadResult};
use crate::mime::guess_mime_type;

/// A file picked by the user, with the MIME type reported for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub path: PathBuf,
}

impl SelectedFile {
    /// Selects `path`, reporting the MIME type guessed from its extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mime_type = guess_mime_type(&path).to_string();
        Self::with_mime_type(path, mime_type)
    }

    /// Selects `path` with an explicitly reported MIME type.
    pub fn with_mime_type(path: impl Into<PathBuf>, mime_type: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        SelectedFile {
            name,
            mime_type: mime_type.into(),
            path,
        }
    }

    /// Reads the whole file into memory.
    pub async fn read(&self) -> UploadResult<BinaryBuffer> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| UploadError::io(&self.path, e))?;
        Ok(BinaryBuffer::new(bytes))
    }
}

/// The raw bytes of a selected file. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryBuffer(Vec<u8>);

impl BinaryBuffer {
    pub fn new(bytes: Vec<u8>) -> Self {
        BinaryBuffer(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
