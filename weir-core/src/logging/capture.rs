//! The capturing component logger.

use super::event::{LogEntry, LogLevel};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Append-only storage shared by every clone of one [`ComponentLog`].
struct CaptureSink {
    entries: RwLock<Vec<LogEntry>>,
    next_seq: AtomicU64,
}

/// A component-scoped logger that captures messages for later assertion
/// instead of emitting to a real sink.
///
/// The capture is scoped to an (identifier, subject) pair, records calls
/// FIFO exactly as invoked, never drops or reorders an entry, and never
/// panics. Clones share the same underlying sequence, so the logger handed
/// to a component and the one held by the test observe identical state.
///
/// ```
/// use weir_core::logging::{ComponentLog, LogLevel};
///
/// let log = ComponentLog::new("svc-1", "record-fetcher");
/// log.info("listing directory");
/// log.warn("skipping unreadable entry");
///
/// let entries = log.entries();
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[0].level, LogLevel::Info);
/// assert_eq!(entries[1].message, "skipping unreadable entry");
/// ```
#[derive(Clone)]
pub struct ComponentLog {
    identifier: String,
    subject: String,
    sink: Arc<CaptureSink>,
}

impl ComponentLog {
    /// Create a capture scoped to (identifier, subject).
    #[must_use]
    pub fn new(identifier: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            subject: subject.into(),
            sink: Arc::new(CaptureSink {
                entries: RwLock::new(Vec::new()),
                next_seq: AtomicU64::new(1),
            }),
        }
    }

    /// The identifier this capture is scoped to.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The subject this capture is scoped to.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Append a prepared entry, assigning its sequence number.
    pub fn log(&self, mut entry: LogEntry) {
        entry.seq = self.sink.next_seq.fetch_add(1, Ordering::SeqCst);
        self.sink.entries.write().push(entry);
    }

    /// Record a trace-level message.
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Trace, message));
    }

    /// Record a debug-level message.
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogEntry::debug(message));
    }

    /// Record an info-level message.
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogEntry::info(message));
    }

    /// Record a warn-level message.
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogEntry::warn(message));
    }

    /// Record a warn-level message with a cause.
    pub fn warn_with_cause(&self, message: impl Into<String>, cause: impl std::fmt::Display) {
        self.log(LogEntry::warn(message).with_cause(cause));
    }

    /// Record an error-level message.
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogEntry::error(message));
    }

    /// Record an error-level message with a cause.
    pub fn error_with_cause(&self, message: impl Into<String>, cause: impl std::fmt::Display) {
        self.log(LogEntry::error(message).with_cause(cause));
    }

    /// Get the recorded sequence, in invocation order.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.sink.entries.read().clone()
    }

    /// Get entries at or above a minimum level, preserving order.
    #[must_use]
    pub fn entries_at_level(&self, min_level: LogLevel) -> Vec<LogEntry> {
        self.sink
            .entries
            .read()
            .iter()
            .filter(|e| e.level >= min_level)
            .cloned()
            .collect()
    }

    /// Get entries whose message contains the given fragment.
    #[must_use]
    pub fn entries_containing(&self, fragment: &str) -> Vec<LogEntry> {
        self.sink
            .entries
            .read()
            .iter()
            .filter(|e| e.message.contains(fragment))
            .cloned()
            .collect()
    }

    /// Get the number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sink.entries.read().len()
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ComponentLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentLog")
            .field("identifier", &self.identifier)
            .field("subject", &self.subject)
            .field("entries", &self.len())
            .finish()
    }
}
