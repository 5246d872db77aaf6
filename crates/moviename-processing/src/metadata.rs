//! Media metadata types

use serde::{Deserialize, Serialize};

/// What the sampler needs to know about a video before the first seek.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub duration: f64,
    pub width: u32,
    pub height: u32,
    pub codec: String,
    pub framerate: Option<f32>,
}

impl VideoMetadata {
    /// Size of one `rgb24` frame at native resolution.
    pub fn rgb_frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}
