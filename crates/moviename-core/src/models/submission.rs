use std::fmt::{Display, Formatter, Result as FmtResult};

use super::movie::MovieMatch;

/// Where the current submission attempt stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Sampling,
    Transmitting,
    Succeeded(MovieMatch),
    Failed(String),
}

impl SubmissionState {
    /// A submission is in flight; new submissions and selections are ignored.
    pub fn is_active(&self) -> bool {
        matches!(self, SubmissionState::Sampling | SubmissionState::Transmitting)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded(_) | SubmissionState::Failed(_)
        )
    }

    pub fn movie(&self) -> Option<&MovieMatch> {
        match self {
            SubmissionState::Succeeded(movie) => Some(movie),
            _ => None,
        }
    }
}

impl Display for SubmissionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SubmissionState::Idle => write!(f, "idle"),
            SubmissionState::Validating => write!(f, "validating"),
            SubmissionState::Sampling => write!(f, "sampling"),
            SubmissionState::Transmitting => write!(f, "transmitting"),
            SubmissionState::Succeeded(_) => write!(f, "succeeded"),
            SubmissionState::Failed(_) => write!(f, "failed"),
        }
    }
}
