use bytes::Bytes;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::constants::FRAME_MIME_TYPE;

/// Where a frame artifact came from; only affects its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOrigin {
    Video,
    AnimatedImage,
}

/// One encoded still produced by the frame sampler.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameArtifact {
    /// 1-based position in the sampled sequence.
    pub sequence_index: usize,
    pub bytes: Bytes,
    pub mime_type: &'static str,
    pub origin: FrameOrigin,
}

impl FrameArtifact {
    pub fn jpeg(sequence_index: usize, bytes: impl Into<Bytes>, origin: FrameOrigin) -> Self {
        Self {
            sequence_index,
            bytes: bytes.into(),
            mime_type: FRAME_MIME_TYPE,
            origin,
        }
    }

    /// File name used in multipart uploads and when writing frames to disk.
    pub fn file_name(&self) -> String {
        match self.origin {
            FrameOrigin::Video => format!("frame_{}.jpg", self.sequence_index),
            FrameOrigin::AnimatedImage => format!("gif_frame_{}.jpg", self.sequence_index),
        }
    }
}

impl Debug for FrameArtifact {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FrameArtifact")
            .field("sequence_index", &self.sequence_index)
            .field("len", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .field("origin", &self.origin)
            .finish()
    }
}

/// Evenly spaced capture timestamps for a source of known duration.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingPlan {
    pub source_duration_seconds: f64,
    pub frame_count: usize,
    pub timestamps: Vec<f64>,
}

impl SamplingPlan {
    /// `timestamps[i] = i * (duration / frame_count)`. The first timestamp is
    /// always 0 and the last one stays strictly before the end of the source.
    /// A `frame_count` of zero yields an empty plan.
    pub fn new(source_duration_seconds: f64, frame_count: usize) -> Self {
        let timestamps = if frame_count == 0 {
            Vec::new()
        } else {
            let interval = source_duration_seconds / frame_count as f64;
            (0..frame_count).map(|i| i as f64 * interval).collect()
        };

        Self {
            source_duration_seconds,
            frame_count,
            timestamps,
        }
    }

    pub fn interval(&self) -> f64 {
        if self.frame_count == 0 {
            0.0
        } else {
            self.source_duration_seconds / self.frame_count as f64
        }
    }
}
