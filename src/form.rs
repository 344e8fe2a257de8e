// src/form.rs

use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{UploadError, UploadResult};
use crate::file::SelectedFile;
use crate::mime::is_gif_type;
use crate::pipeline::UploadPipeline;
use crate::transport::{ServerResponse, Transport};

/// Shown when the selected file is not reported as a GIF.
pub const NOT_A_GIF_MESSAGE: &str = "Come on this is not a gif";

/// Where the form gets the user's file from.
pub trait FileInput {
    fn selected_file(&self) -> Option<SelectedFile>;
}

/// Text element that shows the form's error message.
pub trait ErrorLabel {
    fn set_text(&mut self, text: &str);
}

/// The view the form lives in. Reloaded after every upload.
pub trait View {
    fn reload(&mut self) -> BoxFuture<'_, UploadResult<()>>;
}

/// What a submit ended in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The file was not a GIF. Nothing was sent.
    Rejected,
    /// The file was sent and a reload attempted, whatever the status.
    Uploaded { response: ServerResponse },
}

/// The upload form, wired to its file input, error label and view.
pub struct UploadForm<F, E, V> {
    file_input: F,
    error_label: E,
    view: V,
    pipeline: UploadPipeline,
}

impl<F, E, V> UploadForm<F, E, V>
where
    F: FileInput,
    E: ErrorLabel,
    V: View,
{
    pub fn init(file_input: F, error_label: E, view: V, pipeline: UploadPipeline) -> Self {
        UploadForm {
            file_input,
            error_label,
            view,
            pipeline,
        }
    }

    pub async fn submit(&mut self) -> UploadResult<SubmitOutcome> {
        let file = self
            .file_input
            .selected_file()
            .ok_or(UploadError::NoFileSelected)?;

        if !is_gif_type(&file.mime_type) {
            info!("Rejected {}: reported type '{}'", file.name, file.mime_type);
            self.error_label.set_text(NOT_A_GIF_MESSAGE);
            return Ok(SubmitOutcome::Rejected);
        }

        self.error_label.set_text("");
        let response = self.pipeline.run(&file).await?;
        // The upload already landed; a failed reload must not hide it.
        if let Err(e) = self.view.reload().await {
            warn!("Reload after upload failed: {e}");
        }
        Ok(SubmitOutcome::Uploaded { response })
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn error_label(&self) -> &E {
        &self.error_label
    }

    pub fn into_parts(self) -> (F, E, V) {
        (self.file_input, self.error_label, self.view)
    }
}

/// A view backed by the gallery page on the server.
///
/// Reloading fetches the page again and keeps the latest copy.
pub struct GalleryView {
    transport: Arc<dyn Transport>,
    gallery_path: String,
    page: Option<ServerResponse>,
}

impl GalleryView {
    pub fn new(transport: Arc<dyn Transport>, gallery_path: impl Into<String>) -> Self {
        GalleryView {
            transport,
            gallery_path: gallery_path.into(),
            page: None,
        }
    }

    pub fn page(&self) -> Option<&ServerResponse> {
        self.page.as_ref()
    }
}

impl View for GalleryView {
    fn reload(&mut self) -> BoxFuture<'_, UploadResult<()>> {
        async move {
            let page = self.transport.get_page(&self.gallery_path).await?;
            debug!(
                "Reloaded {} ({}, {} bytes)",
                self.gallery_path,
                page.status,
                page.body.len()
            );
            self.page = Some(page);
            Ok(())
        }
        .boxed()
    }
}
