//! Structured logging for chatrelay.
//!
//! Handles subscriber setup (console plus optional rolling NDJSON file),
//! secret redaction, and the per-message relay event log.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger, RelayEvent};
pub use logger::{init_logger, LogOptions};
pub use redact::redact_sensitive_data;
