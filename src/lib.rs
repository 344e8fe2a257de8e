pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod file;
pub mod form;
pub mod mime;
pub mod pipeline;
pub mod transport;

pub use config::Config;
pub use error::{UploadError, UploadResult};
pub use file::{BinaryBuffer, SelectedFile};
pub use form::{ErrorLabel, FileInput, GalleryView, SubmitOutcome, UploadForm, View};
pub use pipeline::{Base64Payload, UploadPipeline};
pub use transport::{HttpTransport, ServerResponse, Transport};
