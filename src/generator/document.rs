//! Default-values document generator
//!
//! Renders the two-section document the merger consumes:
//!
//! ```text
//! <values>
//!     <defaultValues>
//!         <retries>3</retries>
//!     </defaultValues>
//!     <requiredValues>
//!         <token></token>
//!     </requiredValues>
//! </values>
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use quick_xml::escape::escape;
use regex::Regex;

use super::errors::{GeneratorError, GeneratorResult};
use crate::config::{InjectConfig, TYPE_NAME_PLACEHOLDER};
use crate::observability::{log_event_with_fields, Event};

/// XML element names restricted to the ASCII subset
const ELEMENT_NAME_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_.\-]*$";

/// Metadata for one declared field of a destination type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub default_value: Option<String>,
    pub required: bool,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_value: None,
            required: false,
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// An empty default counts as no default
    pub fn has_default(&self) -> bool {
        self.default_value.as_deref().is_some_and(|v| !v.is_empty())
    }
}

impl FromStr for ParameterSpec {
    type Err = GeneratorError;

    /// Parses `name=value` into a parameter with a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| GeneratorError::InvalidArgument(s.to_string()))?;
        Ok(ParameterSpec::new(name).with_default(value))
    }
}

/// Writes default-values documents named after their destination type.
pub struct DefaultValuesGenerator {
    root_element: String,
    defaults_section: String,
    required_section: String,
    file_pattern: String,
    name_pattern: Regex,
}

impl DefaultValuesGenerator {
    pub fn new(config: &InjectConfig) -> GeneratorResult<Self> {
        Ok(Self {
            root_element: config.root_element.clone(),
            defaults_section: config.defaults_section.clone(),
            required_section: config.required_section.clone(),
            file_pattern: config.default_values_pattern.clone(),
            name_pattern: Regex::new(ELEMENT_NAME_PATTERN)?,
        })
    }

    /// File name for `type_name`, as the merger will look it up
    pub fn file_name(&self, type_name: &str) -> String {
        self.file_pattern.replacen(TYPE_NAME_PLACEHOLDER, type_name, 1)
    }

    /// Renders the document for `parameters`, in their given order.
    ///
    /// Parameters without a non-empty default are left out of the defaults
    /// section; parameters not marked required are left out of the required
    /// section.
    pub fn render(&self, parameters: &[ParameterSpec]) -> GeneratorResult<String> {
        let mut seen = HashSet::new();
        for parameter in parameters {
            if !self.name_pattern.is_match(&parameter.name) {
                return Err(GeneratorError::InvalidName(parameter.name.clone()));
            }
            if !seen.insert(parameter.name.as_str()) {
                return Err(GeneratorError::DuplicateParameter(parameter.name.clone()));
            }
        }

        let mut out = String::new();
        out.push_str(&format!("<{}>\n", self.root_element));

        out.push_str(&format!("\t<{}>\n", self.defaults_section));
        for parameter in parameters.iter().filter(|p| p.has_default()) {
            let value = parameter.default_value.as_deref().unwrap_or_default();
            out.push_str(&format!(
                "\t\t<{name}>{value}</{name}>\n",
                name = parameter.name,
                value = escape(value)
            ));
        }
        out.push_str(&format!("\t</{}>\n", self.defaults_section));

        out.push_str(&format!("\t<{}>\n", self.required_section));
        for parameter in parameters.iter().filter(|p| p.required) {
            out.push_str(&format!("\t\t<{name}></{name}>\n", name = parameter.name));
        }
        out.push_str(&format!("\t</{}>\n", self.required_section));

        out.push_str(&format!("</{}>\n", self.root_element));
        Ok(out)
    }

    /// Renders and writes the document for `type_name` under `dir`.
    ///
    /// Returns the path written. `dir` is created if missing.
    pub fn write_to(
        &self,
        dir: &Path,
        type_name: &str,
        parameters: &[ParameterSpec],
    ) -> GeneratorResult<PathBuf> {
        if !self.name_pattern.is_match(type_name) {
            return Err(GeneratorError::InvalidTypeName(type_name.to_string()));
        }

        let document = self.render(parameters)?;
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name(type_name));
        fs::write(&path, document)?;

        let path_str = path.display().to_string();
        let count = parameters.len().to_string();
        log_event_with_fields(
            Event::DefaultValuesGenerated,
            &[
                ("parameters", count.as_str()),
                ("path", path_str.as_str()),
                ("type", type_name),
            ],
        );

        Ok(path)
    }
}
