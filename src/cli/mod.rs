//! Command-line interface
//!
//! - generate: write a type's default-values document
//! - merge: print the effective value tree for one override document
//! - check: validate override documents under the fail-or-log policy

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, generate, load_config, merge, run, run_command, CheckReport};
pub use errors::{CliError, CliErrorCode, CliResult};
