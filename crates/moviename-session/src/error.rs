use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

use moviename_processing::ValidationError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SelectionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("A submission is in progress")]
    Busy,
}

/// Why `submit` did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NoInput,
    /// Both a file and a URL are staged (non-exclusive mode only).
    ConflictingInputs,
    InFlight,
}

impl Display for IgnoreReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            IgnoreReason::NoInput => write!(f, "no file or URL selected"),
            IgnoreReason::ConflictingInputs => write!(f, "both a file and a URL are selected"),
            IgnoreReason::InFlight => write!(f, "a submission is already in progress"),
        }
    }
}
