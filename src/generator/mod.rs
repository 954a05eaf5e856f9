//! Default-values generator
//!
//! Produces the per-type document the merger reads: the declared defaults
//! of a destination type and the names it requires.

mod document;
mod errors;

pub use errors::{GeneratorError, GeneratorResult};
pub use document::{DefaultValuesGenerator, ParameterSpec};
