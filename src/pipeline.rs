// src/pipeline.rs

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::encode::encode_to_base64;
use crate::error::UploadResult;
use crate::file::{BinaryBuffer, SelectedFile};
use crate::transport::{ServerResponse, Transport};

/// Base64 text of a file, sent once as a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64Payload(String);

impl Base64Payload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// CRC-32 of the encoded text, for matching uploads against server logs.
    pub fn checksum(&self) -> u32 {
        crc32fast::hash(self.0.as_bytes())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// read -> encode -> send -> handle-response, one stage after another.
pub struct UploadPipeline {
    transport: Arc<dyn Transport>,
    upload_path: String,
}

impl UploadPipeline {
    pub fn new(transport: Arc<dyn Transport>, upload_path: impl Into<String>) -> Self {
        UploadPipeline {
            transport,
            upload_path: upload_path.into(),
        }
    }

    pub async fn read(&self, file: &SelectedFile) -> UploadResult<BinaryBuffer> {
        let buffer = file.read().await?;
        debug!("Read {} ({} bytes)", file.name, buffer.len());
        Ok(buffer)
    }

    pub fn encode(&self, buffer: BinaryBuffer) -> Base64Payload {
        Base64Payload(encode_to_base64(buffer.as_bytes()))
    }

    pub async fn send(&self, payload: Base64Payload) -> UploadResult<ServerResponse> {
        debug!(
            "Sending {} base64 chars to {} (crc32 {:08x})",
            payload.len(),
            self.upload_path,
            payload.checksum()
        );
        self.transport
            .post_text(&self.upload_path, payload.into_string())
            .await
    }

    /// The status is reported, never acted on.
    pub fn handle_response(&self, response: ServerResponse) -> ServerResponse {
        if response.is_success() {
            info!("Upload accepted with status {}", response.status);
        } else {
            warn!("Server answered upload with status {}", response.status);
        }
        response
    }

    pub async fn run(&self, file: &SelectedFile) -> UploadResult<ServerResponse> {
        let buffer = self.read(file).await?;
        let payload = self.encode(buffer);
        let response = self.send(payload).await?;
        Ok(self.handle_response(response))
    }
}
