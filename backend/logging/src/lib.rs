//! Telemetry and structured logging for benchforge.
//!
//! Console and rolling NDJSON output, plus structured conversion events.

pub mod event_logger;
pub mod logger;

pub use event_logger::{ConversionEvent, EventLogEntry, EventLogger, EVENT_TARGET};
pub use logger::{env_filter, init_logger, LOG_ENV};
