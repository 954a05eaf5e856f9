//! Fail-or-log policy
//!
//! Decides whether a reported failure aborts the caller or is only logged.
//! The injection engine never consults it; an injection failure always
//! propagates. Batch commands use it to keep going past bad inputs.

use std::fmt::Display;

use crate::config::InjectConfig;
use crate::observability::{Event, Logger};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailurePolicy {
    fail_on_error: bool,
}

impl FailurePolicy {
    pub fn new(fail_on_error: bool) -> Self {
        Self { fail_on_error }
    }

    pub fn from_config(config: &InjectConfig) -> Self {
        Self::new(config.fail_on_error)
    }

    pub fn fail_on_error(&self) -> bool {
        self.fail_on_error
    }

    /// Returns `err` when failing is enabled, otherwise logs it and
    /// returns `Ok(())`.
    pub fn fail_or_log<E: Display>(&self, err: E) -> Result<(), E> {
        self.fail_or_log_with(err, None)
    }

    /// Like [`fail_or_log`](Self::fail_or_log), with a line of context
    /// logged alongside the error.
    pub fn fail_or_log_with<E: Display>(&self, err: E, context: Option<&str>) -> Result<(), E> {
        if self.fail_on_error {
            return Err(err);
        }

        let reason = err.to_string();
        let mut fields = vec![("reason", reason.as_str())];
        if let Some(context) = context {
            fields.push(("context", context));
        }
        Logger::error(Event::FailureSuppressed.as_str(), &fields);
        Ok(())
    }
}

impl Default for FailurePolicy {
    fn default() -> Self {
        Self::new(true)
    }
}
