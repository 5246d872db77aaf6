#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use image::{Rgb, RgbImage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use moviename_api_client::{AnalysisGateway, GatewayError, UploadPart};
use moviename_core::models::FrameOrigin;
use moviename_core::{FileInput, FrameArtifact, MovieMatch};
use moviename_processing::{
    FrameExtractor, FrameSampler, SamplingError, VideoMetadata, VideoSource,
};
use moviename_session::{SessionConfig, UploadSession};

pub const INCEPTION_JSON: &str = r#"{
    "poster_url": "https://image.tmdb.org/t/p/w500/inception.jpg",
    "title": "Inception",
    "release_date": "2010-07-15",
    "overview": "A thief who steals corporate secrets through dream-sharing technology is given the inverse task of planting an idea.",
    "vote_average": 8.4
}"#;

pub fn inception() -> MovieMatch {
    serde_json::from_str(INCEPTION_JSON).unwrap()
}

pub fn jpeg_file(name: &str, size: usize) -> FileInput {
    FileInput::new(name, "image/jpeg", vec![0xABu8; size])
}

pub fn mp4_file(name: &str) -> FileInput {
    FileInput::new(name, "video/mp4", vec![0u8; 4096])
}

/// Seekable source with a fixed duration; each frame is shaded by its
/// timestamp.
pub struct ScriptedSource {
    duration: f64,
    cursor: f64,
    seeks: Arc<Mutex<Vec<f64>>>,
}

#[async_trait]
impl VideoSource for ScriptedSource {
    async fn load_metadata(&mut self) -> Result<VideoMetadata, SamplingError> {
        Ok(VideoMetadata {
            duration: self.duration,
            width: 4,
            height: 2,
            codec: "h264".to_string(),
            framerate: Some(24.0),
        })
    }

    async fn seek(&mut self, timestamp_seconds: f64) -> Result<(), SamplingError> {
        self.cursor = timestamp_seconds;
        self.seeks.lock().unwrap().push(timestamp_seconds);
        Ok(())
    }

    fn rasterize(&self) -> Result<RgbImage, SamplingError> {
        let shade = (self.cursor * 20.0) as u8;
        Ok(RgbImage::from_pixel(4, 2, Rgb([shade, shade, shade])))
    }
}

/// Runs the real sampler over a [`ScriptedSource`] and records what it did.
#[derive(Default)]
pub struct ScriptedExtractor {
    pub duration: f64,
    pub seeks: Arc<Mutex<Vec<f64>>>,
    pub video_calls: AtomicUsize,
    pub animated_calls: AtomicUsize,
    /// Time spent decoding before the first seek.
    pub delay: Option<Duration>,
}

impl ScriptedExtractor {
    pub fn with_duration(duration: f64) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn seek_timestamps(&self) -> Vec<f64> {
        self.seeks.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.video_calls.load(Ordering::SeqCst) + self.animated_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FrameExtractor for ScriptedExtractor {
    async fn extract_video_frames(
        &self,
        _input: &FileInput,
        frame_count: usize,
    ) -> Result<Vec<FrameArtifact>, SamplingError> {
        self.video_calls.fetch_add(1, Ordering::SeqCst);
        if self.duration <= 0.0 {
            return Err(SamplingError::decode("Video has no duration"));
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mut source = ScriptedSource {
            duration: self.duration,
            cursor: 0.0,
            seeks: Arc::clone(&self.seeks),
        };
        FrameSampler::new(90).sample(&mut source, frame_count).await
    }

    async fn extract_animated_frames(
        &self,
        _input: &FileInput,
        frame_count: usize,
    ) -> Result<Vec<FrameArtifact>, SamplingError> {
        self.animated_calls.fetch_add(1, Ordering::SeqCst);
        let frame = Bytes::from_static(b"gif-frame");
        Ok((1..=frame_count)
            .map(|i| FrameArtifact::jpeg(i, frame.clone(), FrameOrigin::AnimatedImage))
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Images(Vec<String>),
    Social(String),
}

/// Records every call; can be held open or delayed to observe in-flight
/// behaviour.
#[derive(Default)]
pub struct RecordingGateway {
    pub calls: Mutex<Vec<GatewayCall>>,
    pub delay: Option<Duration>,
    pub gate: Option<Arc<Notify>>,
    pub failure: Option<(u16, String)>,
}

impl RecordingGateway {
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn delayed(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn respond(&self, call: GatewayCall) -> Result<MovieMatch, GatewayError> {
        self.calls.lock().unwrap().push(call);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some((status, body)) => Err(GatewayError::Status {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(inception()),
        }
    }
}

#[async_trait]
impl AnalysisGateway for RecordingGateway {
    async fn analyze_images(&self, parts: Vec<UploadPart>) -> Result<MovieMatch, GatewayError> {
        let names = parts.into_iter().map(|p| p.file_name).collect();
        self.respond(GatewayCall::Images(names)).await
    }

    async fn analyze_social(&self, url: &str) -> Result<MovieMatch, GatewayError> {
        self.respond(GatewayCall::Social(url.to_string())).await
    }
}

pub fn session_with(
    exclusive_inputs: bool,
    extractor: Arc<ScriptedExtractor>,
    gateway: Arc<RecordingGateway>,
) -> UploadSession {
    UploadSession::new(
        SessionConfig {
            frame_count: 4,
            exclusive_inputs,
        },
        extractor,
        gateway,
    )
}
