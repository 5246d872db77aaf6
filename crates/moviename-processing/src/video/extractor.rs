//! Production `FrameExtractor`: stages the upload in a temp file for ffmpeg.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;

use moviename_core::{ClientConfig, FileInput, FrameArtifact};

use super::probe::VideoProbe;
use super::sampler::FrameSampler;
use super::source::FfmpegVideoSource;
use crate::error::SamplingError;
use crate::image::AnimatedImageSampler;
use crate::traits::FrameExtractor;

pub struct FfmpegFrameExtractor {
    ffmpeg_path: String,
    probe: VideoProbe,
    sampler: FrameSampler,
    jpeg_quality: u8,
}

impl FfmpegFrameExtractor {
    pub fn new(ffmpeg_path: String, ffprobe_path: String, jpeg_quality: u8) -> Result<Self> {
        let probe = VideoProbe::new(ffprobe_path).context("Failed to create VideoProbe")?;

        Ok(Self {
            ffmpeg_path,
            probe,
            sampler: FrameSampler::new(jpeg_quality),
            jpeg_quality,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(
            config.ffmpeg_path.clone(),
            config.ffprobe_path.clone(),
            config.jpeg_quality,
        )
    }
}

/// Keep the original extension so ffprobe can lean on it; drop anything odd.
fn temp_suffix(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

#[async_trait]
impl FrameExtractor for FfmpegFrameExtractor {
    #[tracing::instrument(skip(self, input), fields(name = %input.name, size = input.size_bytes))]
    async fn extract_video_frames(
        &self,
        input: &FileInput,
        frame_count: usize,
    ) -> Result<Vec<FrameArtifact>, SamplingError> {
        let temp_file = tempfile::Builder::new()
            .prefix("moviename-")
            .suffix(&temp_suffix(&input.name))
            .tempfile()?;
        tokio::fs::write(temp_file.path(), &input.bytes).await?;

        let mut source = FfmpegVideoSource::new(
            temp_file.path(),
            self.ffmpeg_path.clone(),
            self.probe.clone(),
        )
        .map_err(|e| SamplingError::decode(e.to_string()))?;

        let frames = self.sampler.sample(&mut source, frame_count).await?;

        tracing::info!(frames = frames.len(), "Video frames extracted");
        Ok(frames)
    }

    async fn extract_animated_frames(
        &self,
        input: &FileInput,
        frame_count: usize,
    ) -> Result<Vec<FrameArtifact>, SamplingError> {
        let data = input.bytes.clone();
        let sampler = AnimatedImageSampler::new(self.jpeg_quality);

        tokio::task::spawn_blocking(move || sampler.sample(&data, frame_count))
            .await
            .map_err(|e| SamplingError::decode(format!("Frame task failed: {}", e)))?
    }
}
