//! Upload session controller.
//!
//! Holds the staged input, drives a submission through sampling and
//! transmission, and publishes every [`SubmissionState`] change on a watch
//! channel. At most one submission is in flight per session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

use moviename_api_client::{AnalysisGateway, UploadPart};
use moviename_core::{AppError, FileInput, MediaInput, MovieMatch, SubmissionState, UrlInput};
use moviename_processing::{FrameExtractor, InputValidator};

use crate::config::SessionConfig;
use crate::error::{IgnoreReason, SelectionError};
use crate::ticker::ProgressTicker;

/// Failure reason published when a submit future is dropped mid-flight.
pub const ABANDONED_MESSAGE: &str = "Submission was abandoned";

/// Result of a call to [`UploadSession::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The submission ran; the state is `Succeeded` or `Failed`.
    Finished(SubmissionState),
    Ignored(IgnoreReason),
}

#[derive(Default)]
struct Selection {
    file: Option<FileInput>,
    url: Option<UrlInput>,
    ticker: ProgressTicker,
}

struct Shared {
    config: SessionConfig,
    validator: InputValidator,
    extractor: Arc<dyn FrameExtractor>,
    gateway: Arc<dyn AnalysisGateway>,
    selection: Mutex<Selection>,
    state_tx: watch::Sender<SubmissionState>,
}

/// Cheap to clone; clones share one session.
#[derive(Clone)]
pub struct UploadSession {
    shared: Arc<Shared>,
}

impl UploadSession {
    pub fn new(
        config: SessionConfig,
        extractor: Arc<dyn FrameExtractor>,
        gateway: Arc<dyn AnalysisGateway>,
    ) -> Self {
        Self::with_validator(config, InputValidator::default(), extractor, gateway)
    }

    pub fn with_validator(
        config: SessionConfig,
        validator: InputValidator,
        extractor: Arc<dyn FrameExtractor>,
        gateway: Arc<dyn AnalysisGateway>,
    ) -> Self {
        let (state_tx, _) = watch::channel(SubmissionState::Idle);
        Self {
            shared: Arc::new(Shared {
                config,
                validator,
                extractor,
                gateway,
                selection: Mutex::new(Selection::default()),
                state_tx,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Selection> {
        self.shared
            .selection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: SubmissionState) {
        tracing::debug!(state = %state, "Submission state changed");
        self.shared.state_tx.send_replace(state);
    }

    pub fn state(&self) -> SubmissionState {
        self.shared.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.shared.state_tx.subscribe()
    }

    /// Seconds counted since the current (or last) submission started.
    pub fn elapsed_secs(&self) -> u64 {
        self.lock().ticker.elapsed_secs()
    }

    pub fn is_ticking(&self) -> bool {
        self.lock().ticker.is_running()
    }

    pub fn file(&self) -> Option<FileInput> {
        self.lock().file.clone()
    }

    pub fn url(&self) -> Option<String> {
        self.lock().url.as_ref().map(|u| u.url.clone())
    }

    /// The input a submit would use right now, if exactly one is staged.
    pub fn current_input(&self) -> Option<MediaInput> {
        let selection = self.lock();
        match (&selection.file, &selection.url) {
            (Some(file), None) => Some(MediaInput::File(file.clone())),
            (None, Some(url)) => Some(MediaInput::Url(url.clone())),
            _ => None,
        }
    }

    /// Stage a file, or clear the staged file with `None`.
    ///
    /// A rejected file leaves the previous selection and state untouched.
    pub fn select_file(&self, candidate: Option<FileInput>) -> Result<(), SelectionError> {
        let mut selection = self.lock();
        let previous = self.state();
        if previous.is_active() {
            return Err(SelectionError::Busy);
        }

        let Some(file) = candidate else {
            selection.file = None;
            self.publish(SubmissionState::Idle);
            return Ok(());
        };

        self.publish(SubmissionState::Validating);
        if let Err(err) = self.shared.validator.validate(&file) {
            tracing::debug!(name = %file.name, error = %err, "File rejected");
            self.publish(previous);
            return Err(err.into());
        }

        tracing::info!(
            name = %file.name,
            content_type = %file.declared_mime_type,
            size = file.size_bytes,
            "File selected"
        );
        selection.file = Some(file);
        if self.shared.config.exclusive_inputs {
            selection.url = None;
        }
        self.publish(SubmissionState::Idle);
        Ok(())
    }

    /// Stage a social-media URL. `None` or blank text clears it.
    pub fn set_url(&self, url: Option<String>) -> Result<(), SelectionError> {
        let mut selection = self.lock();
        if self.state().is_active() {
            return Err(SelectionError::Busy);
        }

        match url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            Some(url) => {
                tracing::info!(url = %url, "URL selected");
                selection.url = Some(UrlInput::new(url));
                if self.shared.config.exclusive_inputs {
                    selection.file = None;
                }
            }
            None => selection.url = None,
        }
        self.publish(SubmissionState::Idle);
        Ok(())
    }

    /// Run one submission to completion.
    ///
    /// Ignored with no input, with both inputs staged, or while another
    /// submission is in flight. Failures end in `Failed`; nothing is retried.
    /// Dropping the returned future before it completes ends the submission
    /// as `Failed` with [`ABANDONED_MESSAGE`].
    pub async fn submit(&self) -> SubmitOutcome {
        let (input, in_flight) = match self.begin() {
            Ok(started) => started,
            Err(reason) => {
                tracing::debug!(reason = %reason, "Submit ignored");
                return SubmitOutcome::Ignored(reason);
            }
        };

        let state = match self.run(input).await {
            Ok(movie) => {
                tracing::info!(title = %movie.title, "Submission succeeded");
                SubmissionState::Succeeded(movie)
            }
            Err(err) => {
                tracing::warn!(error = %err, code = err.error_code(), "Submission failed");
                SubmissionState::Failed(err.client_message())
            }
        };

        in_flight.finish(state.clone());
        SubmitOutcome::Finished(state)
    }

    fn begin(&self) -> Result<(MediaInput, InFlight<'_>), IgnoreReason> {
        let mut selection = self.lock();
        if self.state().is_active() {
            return Err(IgnoreReason::InFlight);
        }

        let input = match (&selection.file, &selection.url) {
            (None, None) => return Err(IgnoreReason::NoInput),
            (Some(_), Some(_)) => return Err(IgnoreReason::ConflictingInputs),
            (Some(file), None) => MediaInput::File(file.clone()),
            (None, Some(url)) => MediaInput::Url(url.clone()),
        };

        let first = match &input {
            MediaInput::File(file) if needs_sampling(file) => SubmissionState::Sampling,
            _ => SubmissionState::Transmitting,
        };
        selection.ticker.start();
        self.publish(first);
        Ok((
            input,
            InFlight {
                session: self,
                finished: false,
            },
        ))
    }

    /// Leave the active states: stop the counter, then publish `state`.
    fn end(&self, state: SubmissionState) {
        let mut selection = self.lock();
        selection.ticker.stop();
        self.publish(state);
    }

    async fn run(&self, input: MediaInput) -> Result<MovieMatch, AppError> {
        let file = match input {
            MediaInput::Url(url) => {
                return Ok(self.shared.gateway.analyze_social(&url.url).await?);
            }
            MediaInput::File(file) => file,
        };

        let frame_count = self.shared.config.frame_count;
        let parts: Vec<UploadPart> = if needs_sampling(&file) {
            let frames = self
                .shared
                .extractor
                .extract_video_frames(&file, frame_count)
                .await?;
            frames.into_iter().map(UploadPart::from).collect()
        } else {
            vec![UploadPart::from(file)]
        };

        self.publish(SubmissionState::Transmitting);
        Ok(self.shared.gateway.analyze_images(parts).await?)
    }
}

/// Only videos are sampled; every other file is uploaded as selected.
fn needs_sampling(file: &FileInput) -> bool {
    file.is_video()
}

/// Active phase of one submission. Dropped without [`InFlight::finish`]
/// (the submit future was cancelled), it fails the submission so the
/// session accepts input again.
struct InFlight<'a> {
    session: &'a UploadSession,
    finished: bool,
}

impl InFlight<'_> {
    fn finish(mut self, state: SubmissionState) {
        self.finished = true;
        self.session.end(state);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!("Submission abandoned before completion");
            self.session
                .end(SubmissionState::Failed(ABANDONED_MESSAGE.to_string()));
        }
    }
}
