//! moviename core library
//!
//! Domain models, error types, configuration and share tokens shared by the
//! processing, gateway, session and CLI crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod share;

// Re-export commonly used types
pub use config::{ClientConfig, ConfigError};
pub use error::{AppError, LogLevel};
pub use models::{
    FileInput, FrameArtifact, MediaInput, MovieMatch, SamplingPlan, SubmissionState, UrlInput,
};
