//! CLI command implementations
//!
//! Each command returns its result as a value; [`run_command`] prints it.
//! Commands never touch stdout themselves so they can be tested directly.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::InjectConfig;
use crate::generator::{DefaultValuesGenerator, ParameterSpec};
use crate::inject::InjectionEngine;
use crate::observability::{Logger, Severity};
use crate::policy::FailurePolicy;

use super::args::{Cli, Command};
use super::errors::CliResult;
use super::io::{write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    if cli.verbose {
        Logger::set_min_severity(Severity::Trace);
    }

    match run_command(cli.command) {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Runs one command and returns its JSON result
pub fn run_command(cmd: Command) -> CliResult<Value> {
    match cmd {
        Command::Generate {
            type_name,
            out,
            defaults,
            required,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let path = generate(&config, &type_name, &out, defaults, &required)?;
            Ok(json!({ "path": path.display().to_string() }))
        }
        Command::Merge {
            type_name,
            overrides,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            merge(&config, &type_name, &overrides)
        }
        Command::Check {
            type_name,
            overrides,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let report = check(&config, &type_name, &overrides)?;
            Ok(serde_json::to_value(report)?)
        }
    }
}

/// Loads `path`, or falls back to the built-in defaults
pub fn load_config(path: Option<&Path>) -> CliResult<InjectConfig> {
    match path {
        Some(path) => Ok(InjectConfig::load(path)?),
        None => Ok(InjectConfig::default()),
    }
}

/// Writes the default-values document for `type_name` under `out`.
///
/// A name given both as a default and as required appears in both
/// sections.
pub fn generate(
    config: &InjectConfig,
    type_name: &str,
    out: &Path,
    defaults: Vec<ParameterSpec>,
    required: &[String],
) -> CliResult<PathBuf> {
    let mut parameters = defaults;
    for name in required {
        match parameters.iter_mut().find(|p| &p.name == name) {
            Some(parameter) => parameter.required = true,
            None => parameters.push(ParameterSpec::new(name.as_str()).required()),
        }
    }

    let generator = DefaultValuesGenerator::new(config)?;
    Ok(generator.write_to(out, type_name, &parameters)?)
}

/// Builds the effective value tree and returns it as JSON
pub fn merge(config: &InjectConfig, type_name: &str, overrides: &str) -> CliResult<Value> {
    let engine = InjectionEngine::new(config.resolver(), config.clone());
    let tree = engine.effective_tree(type_name, overrides)?;
    Ok(serde_json::to_value(&tree)?)
}

/// Outcome of [`check`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub passed: Vec<String>,
    pub failed: Vec<String>,
}

/// Validates each override document for `type_name`.
///
/// Under a failing policy the first bad document aborts the command;
/// otherwise every document is checked and failures are listed.
pub fn check(config: &InjectConfig, type_name: &str, overrides: &[String]) -> CliResult<CheckReport> {
    let engine = InjectionEngine::new(config.resolver(), config.clone());
    let policy = FailurePolicy::from_config(config);
    let mut report = CheckReport::default();

    for source in overrides {
        match engine.effective_tree(type_name, source) {
            Ok(_) => report.passed.push(source.clone()),
            Err(err) => {
                policy.fail_or_log_with(err, Some(source.as_str()))?;
                report.failed.push(source.clone());
            }
        }
    }

    Ok(report)
}
