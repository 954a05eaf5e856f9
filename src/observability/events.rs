//! Lifecycle events
//!
//! Every line the engine logs outside an [`ObservationScope`] names one of
//! these events.
//!
//! [`ObservationScope`]: super::ObservationScope

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file read and validated
    ConfigLoaded,

    // Value trees
    /// A document was parsed and pruned
    ValueTreeLoaded,
    /// Defaults and overrides were combined and validated
    ValueTreeMerged,
    /// A required name is absent from the effective tree (FATAL)
    RequiredValueMissing,

    // Generator
    /// A default-values document was written
    DefaultValuesGenerated,

    // Failure policy
    /// A failure was reported without aborting
    FailureSuppressed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ValueTreeLoaded => "VALUE_TREE_LOADED",
            Event::ValueTreeMerged => "VALUE_TREE_MERGED",
            Event::RequiredValueMissing => "REQUIRED_VALUE_MISSING",
            Event::DefaultValuesGenerated => "DEFAULT_VALUES_GENERATED",
            Event::FailureSuppressed => "FAILURE_SUPPRESSED",
        }
    }

    /// Returns true if this event aborts the request that raised it
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::RequiredValueMissing)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
