//! Video frame sampling

pub mod extractor;
pub mod probe;
pub mod sampler;
pub mod source;

pub use extractor::FfmpegFrameExtractor;
pub use probe::VideoProbe;
pub use sampler::FrameSampler;
pub use source::FfmpegVideoSource;
