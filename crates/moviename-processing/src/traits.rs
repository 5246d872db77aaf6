//! Seams between the sampling loop, the decoder behind it and the session
//! that consumes its output.

use async_trait::async_trait;
use image::RgbImage;
use moviename_core::{FileInput, FrameArtifact};

use crate::error::SamplingError;
use crate::metadata::VideoMetadata;

/// A seekable video with a single current-frame cursor.
///
/// Every method takes `&mut self` or `&self` on one source, so a sampler
/// holding the source cannot start a second seek while a capture is pending.
#[async_trait]
pub trait VideoSource: Send {
    /// Load the source and wait until duration and dimensions are known.
    async fn load_metadata(&mut self) -> Result<VideoMetadata, SamplingError>;

    /// Move the cursor to `timestamp_seconds`; resolves once the frame there
    /// is ready to read.
    async fn seek(&mut self, timestamp_seconds: f64) -> Result<(), SamplingError>;

    /// Pixels of the frame under the cursor, at native resolution.
    fn rasterize(&self) -> Result<RgbImage, SamplingError>;
}

/// Turns a staged file into the stills that get uploaded.
#[async_trait]
pub trait FrameExtractor: Send + Sync {
    /// Evenly spaced frames from a video. Exactly `frame_count` on success.
    async fn extract_video_frames(
        &self,
        input: &FileInput,
        frame_count: usize,
    ) -> Result<Vec<FrameArtifact>, SamplingError>;

    /// Repeated-frame fallback for animated images. May return fewer than
    /// `frame_count` frames when some encodes fail.
    async fn extract_animated_frames(
        &self,
        input: &FileInput,
        frame_count: usize,
    ) -> Result<Vec<FrameArtifact>, SamplingError>;
}
