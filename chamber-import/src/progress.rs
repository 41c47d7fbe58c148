//! Import progress reporting.
//!
//! Progress is fire-and-forget: reporters receive finished, human-readable
//! strings and cannot influence the import.

use std::cell::RefCell;

/// Trait for receiving import progress updates.
pub trait ImportProgress {
    /// Called when a file is loaded or skipped (e.g., "Skipping cases.json (not found)").
    fn on_phase(&self, message: &str);

    /// Called every [`PROGRESS_INTERVAL`](crate::engine::PROGRESS_INTERVAL) records.
    fn on_tick(&self, processed: usize, message: &str);

    /// Called once a file's records are committed.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_tick(&self, _processed: usize, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_tick(&self, _processed: usize, message: &str) {
        log::info!("  {}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}

/// Keeps every message in order. Used by tests and by callers that want to
/// show the log after the fact.
#[derive(Default)]
pub struct RecordingProgress {
    messages: RefCell<Vec<String>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl ImportProgress for RecordingProgress {
    fn on_phase(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn on_tick(&self, _processed: usize, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn on_complete(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
