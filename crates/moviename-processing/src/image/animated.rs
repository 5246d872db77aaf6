//! Repeated-frame fallback for animated images (GIF).
//!
//! Animated images have no seek cursor, so no temporal sampling happens: the
//! first visual is rasterized once and encoded `frame_count` times. A frame
//! whose encode fails is skipped and the batch comes back short.

use image::RgbImage;
use moviename_core::models::FrameOrigin;
use moviename_core::FrameArtifact;

use super::encode::encode_jpeg;
use crate::error::SamplingError;

pub struct AnimatedImageSampler {
    jpeg_quality: u8,
}

impl AnimatedImageSampler {
    pub fn new(jpeg_quality: u8) -> Self {
        Self { jpeg_quality }
    }

    #[tracing::instrument(skip(self, data), fields(input_len = data.len()))]
    pub fn sample(
        &self,
        data: &[u8],
        frame_count: usize,
    ) -> Result<Vec<FrameArtifact>, SamplingError> {
        if frame_count == 0 {
            return Err(SamplingError::InvalidFrameCount);
        }

        let visual = image::load_from_memory(data)
            .map_err(|e| SamplingError::decode(format!("Failed to load image: {}", e)))?;
        let pixels = visual.to_rgb8();

        let quality = self.jpeg_quality;
        Ok(repeat_frames(&pixels, frame_count, |pixels| {
            encode_jpeg(pixels, quality).map_err(|e| e.to_string())
        }))
    }
}

fn repeat_frames<E>(pixels: &RgbImage, frame_count: usize, encode: E) -> Vec<FrameArtifact>
where
    E: Fn(&RgbImage) -> Result<Vec<u8>, String>,
{
    let mut frames = Vec::with_capacity(frame_count);

    for index in 1..=frame_count {
        match encode(pixels) {
            Ok(jpeg) => {
                frames.push(FrameArtifact::jpeg(index, jpeg, FrameOrigin::AnimatedImage));
            }
            Err(message) => {
                tracing::warn!(
                    frame = index,
                    error = %message,
                    "Skipping frame that failed to encode"
                );
            }
        }
    }

    frames
}
