use moviename_core::constants::DEFAULT_FRAME_COUNT;
use moviename_core::ClientConfig;

/// Session behaviour switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Stills sampled from a video (or repeated from a GIF).
    pub frame_count: usize,
    /// Selecting a file clears the URL and vice versa.
    pub exclusive_inputs: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_count: DEFAULT_FRAME_COUNT,
            exclusive_inputs: true,
        }
    }
}

impl From<&ClientConfig> for SessionConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            frame_count: config.frame_count,
            exclusive_inputs: config.exclusive_inputs,
        }
    }
}
