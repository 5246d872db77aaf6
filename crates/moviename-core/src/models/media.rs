use bytes::Bytes;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::Path;

/// A file staged for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct FileInput {
    pub bytes: Bytes,
    pub declared_mime_type: String,
    pub size_bytes: u64,
    pub name: String,
}

impl FileInput {
    /// Build a file input; `size_bytes` is taken from the payload.
    pub fn new(
        name: impl Into<String>,
        declared_mime_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        let bytes = bytes.into();
        Self {
            size_bytes: bytes.len() as u64,
            bytes,
            declared_mime_type: declared_mime_type.into(),
            name: name.into(),
        }
    }

    /// Videos go through the frame sampler before upload.
    pub fn is_video(&self) -> bool {
        self.declared_mime_type.starts_with("video/")
    }

    pub fn is_animated_image(&self) -> bool {
        self.declared_mime_type == "image/gif"
    }
}

// Payloads can be megabytes; never dump them into logs.
impl Debug for FileInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FileInput")
            .field("name", &self.name)
            .field("declared_mime_type", &self.declared_mime_type)
            .field("size_bytes", &self.size_bytes)
            .finish()
    }
}

/// A social-media clip link staged for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlInput {
    pub url: String,
}

impl UrlInput {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// What the user supplied for the current submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaInput {
    File(FileInput),
    Url(UrlInput),
}

/// Best-effort content type from a file name, the way a browser fills in
/// `File.type`. Unknown extensions map to `application/octet-stream`.
pub fn content_type_for_filename(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        // Videos
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "ogv" | "ogg" => "video/ogg",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        // Everything else
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
