//! Frame sampler - evenly spaced stills from a seekable video.

use moviename_core::models::FrameOrigin;
use moviename_core::{FrameArtifact, SamplingPlan};

use crate::error::SamplingError;
use crate::image::encode_jpeg;
use crate::traits::VideoSource;

#[derive(Debug, Clone)]
pub struct FrameSampler {
    jpeg_quality: u8,
}

impl FrameSampler {
    pub fn new(jpeg_quality: u8) -> Self {
        Self { jpeg_quality }
    }

    /// Capture `frame_count` frames at `i * duration / frame_count`.
    ///
    /// Waits for metadata, then seeks and captures one frame at a time: the
    /// next seek is only issued after the previous frame has been encoded.
    /// Any failure aborts the batch; no partial sequence is returned.
    pub async fn sample<S>(
        &self,
        source: &mut S,
        frame_count: usize,
    ) -> Result<Vec<FrameArtifact>, SamplingError>
    where
        S: VideoSource + ?Sized,
    {
        if frame_count == 0 {
            return Err(SamplingError::InvalidFrameCount);
        }

        let metadata = source.load_metadata().await?;
        let plan = SamplingPlan::new(metadata.duration, frame_count);

        tracing::info!(
            duration = plan.source_duration_seconds,
            frame_count,
            interval = plan.interval(),
            "Sampling video frames"
        );

        let mut frames = Vec::with_capacity(frame_count);
        for (frame_index, &timestamp) in plan.timestamps.iter().enumerate() {
            source.seek(timestamp).await?;
            let pixels = source.rasterize()?;

            let jpeg = encode_jpeg(&pixels, self.jpeg_quality).map_err(|e| {
                SamplingError::Encode {
                    index: frame_index + 1,
                    message: e.to_string(),
                }
            })?;

            tracing::debug!(
                frame = frame_index + 1,
                timestamp,
                bytes = jpeg.len(),
                "Frame captured"
            );
            frames.push(FrameArtifact::jpeg(frame_index + 1, jpeg, FrameOrigin::Video));
        }

        Ok(frames)
    }
}
