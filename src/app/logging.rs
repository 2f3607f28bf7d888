//! Progress logging utilities.

use log::info;
use std::time::{Duration, Instant};

/// Milestone-based progress logger owned by one scan driver.
///
/// Each driver keeps its own checkpoint so that concurrent drivers never reset
/// one another's timers.
#[derive(Debug)]
pub struct ProgressTracker {
    label: &'static str,
    interval: u64,
    last_checkpoint: Instant,
}

impl ProgressTracker {
    /// `interval` of 0 disables milestone logging.
    pub fn new(label: &'static str, interval: u64) -> Self {
        Self {
            label,
            interval,
            last_checkpoint: Instant::now(),
        }
    }

    /// Called after every processed record. Logs and restarts the timer when
    /// `processed` reaches a multiple of the interval; returns whether it did.
    pub fn record(&mut self, processed: u64, matched: u64) -> bool {
        if self.interval == 0 || processed == 0 || processed % self.interval != 0 {
            return false;
        }
        log_progress(self.label, processed, matched, self.last_checkpoint.elapsed());
        self.last_checkpoint = Instant::now();
        true
    }
}

/// Logs one progress line.
///
/// # Arguments
///
/// * `label` - Source name
/// * `processed` - Records processed so far by this source
/// * `matched` - Records matched so far by this source
/// * `since_last` - Time since the previous milestone
pub fn log_progress(label: &str, processed: u64, matched: u64, since_last: Duration) {
    info!(
        "{}: {} processed, {} valid (took {:.2?})",
        label, processed, matched, since_last
    );
}
