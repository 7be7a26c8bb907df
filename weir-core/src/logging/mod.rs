//! Component-scoped log capture.
//!
//! A component under test logs through a [`ComponentLog`] that records every
//! call into an ordered, append-only sequence instead of emitting to a real
//! sink. Tests read the sequence back for assertions; nothing is ever
//! dropped or reordered.

mod capture;
mod event;

pub use capture::ComponentLog;
pub use event::{LogEntry, LogLevel};
