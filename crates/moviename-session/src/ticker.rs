//! One-second progress counter for the active part of a submission.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Default)]
pub struct ProgressTicker {
    elapsed: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to 0 and count up once per second. Must be called from within a
    /// tokio runtime.
    pub fn start(&mut self) {
        self.stop();
        self.elapsed.store(0, Ordering::Relaxed);

        let elapsed = Arc::clone(&self.elapsed);
        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK, TICK);
            loop {
                interval.tick().await;
                elapsed.fetch_add(1, Ordering::Relaxed);
            }
        }));
    }

    /// Stop counting; the last value is kept.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.load(Ordering::Relaxed)
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
