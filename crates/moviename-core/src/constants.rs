//! Application-wide constants.

/// Largest file accepted for upload: 5 MiB, inclusive.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// MIME types accepted by the input validator. Matched exactly.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "video/mp4",
    "video/webm",
    "video/ogg",
];

/// Number of stills sampled from a video when nothing else is configured.
pub const DEFAULT_FRAME_COUNT: usize = 4;

/// Every frame artifact is a JPEG.
pub const FRAME_MIME_TYPE: &str = "image/jpeg";

/// Filter offered by a file picker. Enforcement is the stricter allow-list.
pub const PICKER_ACCEPT_FILTER: &str = "image/*,video/*";
