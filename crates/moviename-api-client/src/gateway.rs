use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use moviename_core::{AppError, FileInput, FrameArtifact, MovieMatch};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response as JSON: {0}")]
    InvalidResponse(String),

    #[error("Nothing to upload")]
    EmptyUpload,
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        AppError::Transmission(err.to_string())
    }
}

/// Multipart field name used for uploaded images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadField {
    /// Every part under a repeated `files` field.
    #[default]
    Files,
    /// A lone part goes under `file`; sets of parts still use `files`.
    LegacySingle,
}

impl UploadField {
    pub fn field_name(&self, part_count: usize) -> &'static str {
        match self {
            UploadField::LegacySingle if part_count == 1 => "file",
            _ => "files",
        }
    }
}

/// One image in an analysis upload.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadPart {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl std::fmt::Debug for UploadPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadPart")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl From<FrameArtifact> for UploadPart {
    fn from(frame: FrameArtifact) -> Self {
        Self {
            file_name: frame.file_name(),
            mime_type: frame.mime_type.to_string(),
            bytes: frame.bytes,
        }
    }
}

// Still images are sent exactly as selected.
impl From<FileInput> for UploadPart {
    fn from(file: FileInput) -> Self {
        Self {
            file_name: file.name,
            mime_type: file.declared_mime_type,
            bytes: file.bytes,
        }
    }
}

/// Remote movie identification backend.
#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    /// Upload one or more images and get the best match back.
    async fn analyze_images(&self, parts: Vec<UploadPart>)
        -> Result<MovieMatch, GatewayError>;

    /// Ask the backend to analyze a social-media clip by URL.
    async fn analyze_social(&self, url: &str) -> Result<MovieMatch, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use moviename_core::models::FrameOrigin;

    #[test]
    fn test_field_name() {
        assert_eq!(UploadField::Files.field_name(1), "files");
        assert_eq!(UploadField::Files.field_name(4), "files");
        assert_eq!(UploadField::LegacySingle.field_name(1), "file");
        assert_eq!(UploadField::LegacySingle.field_name(4), "files");
    }

    #[test]
    fn test_part_from_frame() {
        let frame = FrameArtifact::jpeg(
            2,
            Bytes::from_static(b"jpeg"),
            FrameOrigin::AnimatedImage,
        );
        let part = UploadPart::from(frame);
        assert_eq!(part.file_name, "gif_frame_2.jpg");
        assert_eq!(part.mime_type, "image/jpeg");
    }

    #[test]
    fn test_status_error_message_verbatim() {
        let err = GatewayError::Status {
            status: 502,
            body: "upstream timed out".to_string(),
        };
        let app: AppError = err.into();
        assert_eq!(
            app.client_message(),
            "API request failed with status 502: upstream timed out"
        );
    }
}
