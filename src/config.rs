//! Engine configuration
//!
//! Read from a JSON file. Every key is optional:
//!
//! ```json
//! {
//!   "resource_roots": ["target/generated-resources", "tests/resources"],
//!   "default_values_pattern": "{}-default-values.xml",
//!   "fail_on_error": true
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{InjectError, InjectResult};
use crate::observability::{log_event_with_fields, Event};
use crate::tree::DirectoryResolver;

/// Placeholder replaced by the type name in `default_values_pattern`.
pub const TYPE_NAME_PLACEHOLDER: &str = "{}";

/// Configuration for the injection engine and the default-values generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectConfig {
    /// Directories searched, in order, for value-tree documents
    #[serde(default = "default_resource_roots")]
    pub resource_roots: Vec<PathBuf>,

    /// Name of the default-values document; `{}` is the type name
    #[serde(default = "default_values_pattern")]
    pub default_values_pattern: String,

    /// Root element written by the generator
    #[serde(default = "default_root_element")]
    pub root_element: String,

    /// Section listing required field names
    #[serde(default = "default_required_section")]
    pub required_section: String,

    /// Section holding default values
    #[serde(default = "default_defaults_section")]
    pub defaults_section: String,

    /// Whether reported failures abort (true) or are only logged (false)
    #[serde(default = "default_fail_on_error")]
    pub fail_on_error: bool,
}

fn default_resource_roots() -> Vec<PathBuf> {
    vec![
        PathBuf::from("target/generated-resources"),
        PathBuf::from("tests/resources"),
    ]
}
fn default_values_pattern() -> String {
    "{}-default-values.xml".to_string()
}
fn default_root_element() -> String {
    "values".to_string()
}
fn default_required_section() -> String {
    "requiredValues".to_string()
}
fn default_defaults_section() -> String {
    "defaultValues".to_string()
}
fn default_fail_on_error() -> bool {
    true
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self {
            resource_roots: default_resource_roots(),
            default_values_pattern: default_values_pattern(),
            root_element: default_root_element(),
            required_section: default_required_section(),
            defaults_section: default_defaults_section(),
            fail_on_error: default_fail_on_error(),
        }
    }
}

impl InjectConfig {
    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> InjectResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            InjectError::config_invalid(path.display().to_string(), format!("Failed to read file: {}", e))
        })?;

        let config: InjectConfig = serde_json::from_str(&content).map_err(|e| {
            InjectError::config_invalid(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        config
            .validate()
            .map_err(|e| InjectError::config_invalid(path.display().to_string(), e))?;

        let path_str = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", path_str.as_str())]);

        Ok(config)
    }

    /// Checks the values themselves, not the file
    pub fn validate(&self) -> Result<(), String> {
        if !self.default_values_pattern.contains(TYPE_NAME_PLACEHOLDER) {
            return Err(format!(
                "default_values_pattern '{}' must contain '{}'",
                self.default_values_pattern, TYPE_NAME_PLACEHOLDER
            ));
        }

        for (key, value) in [
            ("root_element", &self.root_element),
            ("required_section", &self.required_section),
            ("defaults_section", &self.defaults_section),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{} must not be empty", key));
            }
        }

        if self.required_section == self.defaults_section {
            return Err("required_section and defaults_section must differ".into());
        }

        Ok(())
    }

    /// Name of the default-values document for `type_name`
    pub fn default_values_name(&self, type_name: &str) -> String {
        self.default_values_pattern
            .replacen(TYPE_NAME_PLACEHOLDER, type_name, 1)
    }

    /// Resolver over the configured resource roots
    pub fn resolver(&self) -> DirectoryResolver {
        DirectoryResolver::new(self.resource_roots.clone())
    }
}
