//! Observability subsystem
//!
//! Structured JSON logging for registry preparation and query execution.
//! Logging is read-only with respect to results: nothing here can change
//! what a query returns.

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Logs a lifecycle event at the severity it implies
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}

/// Logs a high-volume per-row event at TRACE
pub fn trace_event(event: Event, fields: &[(&str, &str)]) {
    Logger::trace(event.as_str(), fields);
}
