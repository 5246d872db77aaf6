//! moviename upload session
//!
//! Owns the selected input, the submission state machine and the progress
//! counter shown while a submission is in flight.

pub mod config;
pub mod error;
pub mod session;
pub mod ticker;

pub use config::SessionConfig;
pub use error::{IgnoreReason, SelectionError};
pub use session::{SubmitOutcome, UploadSession, ABANDONED_MESSAGE};
pub use ticker::ProgressTicker;
