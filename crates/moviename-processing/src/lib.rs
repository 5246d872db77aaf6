//! moviename media processing
//!
//! Everything that touches media bytes before upload: the input validator,
//! the frame sampler for videos and the repeated-frame fallback for animated
//! images.

pub mod error;
pub mod image;
pub mod metadata;
pub mod traits;
pub mod validator;
pub mod video;

// Re-export commonly used types
pub use error::SamplingError;
pub use image::{encode_jpeg, AnimatedImageSampler};
pub use metadata::VideoMetadata;
pub use traits::{FrameExtractor, VideoSource};
pub use validator::{InputValidator, ValidationError};
pub use video::{FfmpegFrameExtractor, FfmpegVideoSource, FrameSampler, VideoProbe};
