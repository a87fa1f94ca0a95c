//! Sinks for failures reported between seeding attempts.

use std::sync::Mutex;

/// Receives the message of each failed attempt that is about to be retried.
pub trait SeedLogger: Send + Sync {
    fn log_error(&self, message: &str);
}

/// Forwards retry failures to `tracing` at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl SeedLogger for TracingLogger {
    fn log_error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// Keeps every logged message in memory.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    messages: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the messages logged so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SeedLogger for RecordingLogger {
    fn log_error(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

impl<L: SeedLogger + ?Sized> SeedLogger for &L {
    fn log_error(&self, message: &str) {
        (**self).log_error(message);
    }
}
