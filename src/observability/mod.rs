//! Observability
//!
//! Structured JSON logging for the load, merge and inject stages.
//!
//! # Usage
//!
//! ```ignore
//! use treefill::observability::{log_event_with_fields, Event, ObservationScope};
//!
//! log_event_with_fields(Event::ValueTreeLoaded, &[("source", "overrides.xml")]);
//!
//! let scope = ObservationScope::with_fields("INJECTION", &[("type", "BuildMojo")]);
//! // ... do work ...
//! scope.complete();
//! ```
//!
//! Logging is synchronous and never fails the caller.

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};

#[cfg(test)]
pub(crate) use logger::capture;

fn event_severity(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event_severity(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event_severity(event), event.as_str(), fields);
}
