//! `VideoSource` backed by ffprobe + ffmpeg child processes.
//!
//! Each seek decodes exactly one frame at the requested timestamp into raw
//! `rgb24` at the stream's native size and keeps it as the current frame.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use super::probe::{validate_binary_path, VideoProbe};
use crate::error::SamplingError;
use crate::metadata::VideoMetadata;
use crate::traits::VideoSource;

pub struct FfmpegVideoSource {
    path: PathBuf,
    ffmpeg_path: String,
    probe: VideoProbe,
    metadata: Option<VideoMetadata>,
    current_frame: Option<RgbImage>,
}

impl FfmpegVideoSource {
    pub fn new(path: impl Into<PathBuf>, ffmpeg_path: String, probe: VideoProbe) -> Result<Self> {
        validate_binary_path(&ffmpeg_path).map_err(|e| anyhow!("Invalid ffmpeg_path: {}", e))?;

        Ok(Self {
            path: path.into(),
            ffmpeg_path,
            probe,
            metadata: None,
            current_frame: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        ffmpeg.operation = "decode_frame"
    ))]
    async fn decode_frame_at(&self, timestamp_seconds: f64) -> Result<Vec<u8>, SamplingError> {
        let output = Command::new(&self.ffmpeg_path)
            .args(["-v", "error", "-noautorotate", "-ss"])
            .arg(format!("{:.3}", timestamp_seconds))
            .arg("-i")
            .arg(&self.path)
            .args([
                "-frames:v",
                "1",
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgb24",
                "pipe:1",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| SamplingError::decode(format!("Failed to execute ffmpeg: {}", e)))?;

        if !output.status.success() {
            return Err(SamplingError::decode(format!(
                "FFmpeg seek to {:.3}s failed: {}",
                timestamp_seconds,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(output.stdout)
    }
}

/// Wrap one raw `rgb24` frame. A short buffer means the decoder produced
/// nothing usable at that position.
pub(crate) fn frame_from_raw(
    metadata: &VideoMetadata,
    timestamp_seconds: f64,
    mut raw: Vec<u8>,
) -> Result<RgbImage, SamplingError> {
    let expected = metadata.rgb_frame_len();
    if raw.is_empty() {
        return Err(SamplingError::decode(format!(
            "No frame decoded at {:.3}s",
            timestamp_seconds
        )));
    }
    if raw.len() > expected {
        raw.truncate(expected);
    }

    let actual = raw.len();
    RgbImage::from_raw(metadata.width, metadata.height, raw).ok_or_else(|| {
        SamplingError::decode(format!(
            "Frame at {:.3}s is {} bytes, expected {} for {}x{}",
            timestamp_seconds, actual, expected, metadata.width, metadata.height
        ))
    })
}

#[async_trait]
impl VideoSource for FfmpegVideoSource {
    async fn load_metadata(&mut self) -> Result<VideoMetadata, SamplingError> {
        let metadata = self.probe.probe(&self.path).await?;
        self.metadata = Some(metadata.clone());
        Ok(metadata)
    }

    async fn seek(&mut self, timestamp_seconds: f64) -> Result<(), SamplingError> {
        let metadata = self
            .metadata
            .as_ref()
            .ok_or_else(|| SamplingError::decode("Seek before metadata was loaded"))?;

        let raw = self.decode_frame_at(timestamp_seconds).await?;
        let frame = frame_from_raw(metadata, timestamp_seconds, raw)?;
        self.current_frame = Some(frame);
        Ok(())
    }

    fn rasterize(&self) -> Result<RgbImage, SamplingError> {
        self.current_frame
            .clone()
            .ok_or_else(|| SamplingError::decode("No frame under the cursor"))
    }
}
