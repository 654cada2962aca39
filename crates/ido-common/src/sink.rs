//! Event sinks.
//!
//! Transcoding operations never print or format output themselves. They
//! report `(level, message)` pairs to an [`EventSink`] supplied by the caller,
//! which decides where those events go.

use std::fmt;

use parking_lot::Mutex;

/// Severity of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Progress information.
    Info,
    /// A step finished and produced output.
    Success,
    /// Non-fatal condition; execution continues.
    Warning,
    /// Fatal condition for the current operation.
    Error,
}

impl Level {
    /// Name used by the host line protocol.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Success => "SUCCESS",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver for progress and diagnostic events.
pub trait EventSink {
    /// Record a single event.
    fn emit(&self, level: Level, message: &str);

    /// Record an informational event.
    fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    /// Record a success event.
    fn success(&self, message: &str) {
        self.emit(Level::Success, message);
    }

    /// Record a warning.
    fn warning(&self, message: &str) {
        self.emit(Level::Warning, message);
    }

    /// Record an error.
    fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }
}

impl<T: EventSink + ?Sized> EventSink for &T {
    fn emit(&self, level: Level, message: &str) {
        (**self).emit(level, message)
    }
}

impl<T: EventSink + ?Sized> EventSink for Box<T> {
    fn emit(&self, level: Level, message: &str) {
        (**self).emit(level, message)
    }
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _level: Level, _message: &str) {}
}

/// Sink that forwards events to `tracing`.
///
/// `Success` events are logged at info level with `outcome = "success"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, level: Level, message: &str) {
        match level {
            Level::Info => tracing::info!("{}", message),
            Level::Success => tracing::info!(outcome = "success", "{}", message),
            Level::Warning => tracing::warn!("{}", message),
            Level::Error => tracing::error!("{}", message),
        }
    }
}

/// Sink that keeps every event in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far, in order.
    pub fn events(&self) -> Vec<(Level, String)> {
        self.events.lock().clone()
    }

    /// Messages recorded at a given level.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Whether any event at the given level was recorded.
    pub fn has(&self, level: Level) -> bool {
        self.events.lock().iter().any(|(l, _)| *l == level)
    }
}

impl EventSink for MemorySink {
    fn emit(&self, level: Level, message: &str) {
        self.events.lock().push((level, message.to_owned()));
    }
}
