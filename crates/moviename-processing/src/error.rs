use moviename_core::AppError;

/// Errors produced while turning a video or animated image into stills.
#[derive(Debug, thiserror::Error)]
pub enum SamplingError {
    /// Metadata, seek or decode failure. Fatal to the whole batch.
    #[error("Failed to decode media: {0}")]
    Decode(String),

    #[error("Failed to encode frame {index} as JPEG: {message}")]
    Encode { index: usize, message: String },

    #[error("Frame count must be at least 1")]
    InvalidFrameCount,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SamplingError {
    pub fn decode(message: impl Into<String>) -> Self {
        SamplingError::Decode(message.into())
    }
}

impl From<SamplingError> for AppError {
    fn from(err: SamplingError) -> Self {
        match err {
            SamplingError::Decode(message) => AppError::Decode(message),
            err @ SamplingError::Encode { .. } => AppError::Decode(err.to_string()),
            err @ (SamplingError::InvalidFrameCount | SamplingError::Io(_)) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}
