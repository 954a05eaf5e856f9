//! Begin/complete logging around one unit of work

use std::cell::Cell;
use std::time::Instant;

use super::logger::Logger;

/// Logs `{name}_BEGIN` on creation and exactly one closing line.
///
/// The closing line is `{name}_COMPLETE` from [`complete`](Self::complete),
/// `{name}_FAILED` from [`fail`](Self::fail), or `{name}_INCOMPLETE` if the
/// scope is dropped without either. Closing lines repeat the opening fields
/// and add `elapsed_ms`.
pub struct ObservationScope<'a> {
    name: &'a str,
    completed: Cell<bool>,
    fields: Vec<(&'a str, String)>,
    timer: Timer,
}

impl<'a> ObservationScope<'a> {
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        Logger::info(&format!("{}_BEGIN", name), fields);

        Self {
            name,
            completed: Cell::new(false),
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            timer: Timer::new(),
        }
    }

    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    pub fn complete_with_fields(self, extra_fields: &[(&str, &str)]) {
        self.completed.set(true);
        let elapsed = self.timer.elapsed_ms();
        let mut fields = self.closing_fields(&elapsed);
        fields.extend(extra_fields.iter().copied());
        Logger::info(&format!("{}_COMPLETE", self.name), &fields);
    }

    pub fn fail(self, reason: &str) {
        self.completed.set(true);
        let elapsed = self.timer.elapsed_ms();
        let mut fields = self.closing_fields(&elapsed);
        fields.push(("reason", reason));
        Logger::error(&format!("{}_FAILED", self.name), &fields);
    }

    pub fn is_completed(&self) -> bool {
        self.completed.get()
    }

    fn closing_fields<'s>(&'s self, elapsed: &'s str) -> Vec<(&'s str, &'s str)> {
        let mut fields: Vec<(&str, &str)> =
            self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        fields.push(("elapsed_ms", elapsed));
        fields
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed.get() {
            Logger::warn(
                &format!("{}_INCOMPLETE", self.name),
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}

/// Wall-clock timer for `elapsed_ms` fields
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> String {
        self.start.elapsed().as_millis().to_string()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
