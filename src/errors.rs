//! Injection error types
//!
//! Error codes:
//! - TREEFILL_LOAD_FAILED (load)
//! - TREEFILL_REQUIRED_DECLARATION_MISSING (merge)
//! - TREEFILL_DEFAULT_DECLARATION_MISSING (merge)
//! - TREEFILL_REQUIRED_VALUE_MISSING (merge)
//! - TREEFILL_FIELD_NOT_DECLARED (inject)
//! - TREEFILL_SCALAR_CONVERSION_FAILED (inject)
//! - TREEFILL_CONSTRUCTION_FAILED (inject)
//! - TREEFILL_CONFIG_INVALID (config)
//!
//! Every error is fatal for the injection that raised it. Nothing is retried
//! and no default is substituted.

use std::error::Error;
use std::fmt;

/// Boxed underlying cause carried by an [`InjectError`].
pub type BoxedCause = Box<dyn Error + Send + Sync + 'static>;

/// Pipeline stage that raised an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading and parsing a value tree
    Load,
    /// Combining and validating the three value trees
    Merge,
    /// Building the object graph
    Inject,
    /// Reading engine configuration
    Config,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Merge => "merge",
            Stage::Inject => "inject",
            Stage::Config => "config",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Injection error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectErrorCode {
    /// Resource unreadable or not well-formed
    LoadFailed,
    /// The `requiredValues` section is absent
    RequiredDeclarationMissing,
    /// The `defaultValues` section is absent
    DefaultDeclarationMissing,
    /// A required name has no node in the merged tree
    RequiredValueMissing,
    /// A node names a field the target type does not declare
    FieldNotDeclared,
    /// A leaf payload does not parse into the destination scalar
    ScalarConversionFailed,
    /// A target or composite type could not be constructed
    ConstructionFailed,
    /// Engine configuration is unreadable or malformed
    ConfigInvalid,
}

impl InjectErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            InjectErrorCode::LoadFailed => "TREEFILL_LOAD_FAILED",
            InjectErrorCode::RequiredDeclarationMissing => "TREEFILL_REQUIRED_DECLARATION_MISSING",
            InjectErrorCode::DefaultDeclarationMissing => "TREEFILL_DEFAULT_DECLARATION_MISSING",
            InjectErrorCode::RequiredValueMissing => "TREEFILL_REQUIRED_VALUE_MISSING",
            InjectErrorCode::FieldNotDeclared => "TREEFILL_FIELD_NOT_DECLARED",
            InjectErrorCode::ScalarConversionFailed => "TREEFILL_SCALAR_CONVERSION_FAILED",
            InjectErrorCode::ConstructionFailed => "TREEFILL_CONSTRUCTION_FAILED",
            InjectErrorCode::ConfigInvalid => "TREEFILL_CONFIG_INVALID",
        }
    }

    /// Returns the pipeline stage that raises this error
    pub fn stage(&self) -> Stage {
        match self {
            InjectErrorCode::LoadFailed => Stage::Load,
            InjectErrorCode::RequiredDeclarationMissing
            | InjectErrorCode::DefaultDeclarationMissing
            | InjectErrorCode::RequiredValueMissing => Stage::Merge,
            InjectErrorCode::FieldNotDeclared
            | InjectErrorCode::ScalarConversionFailed
            | InjectErrorCode::ConstructionFailed => Stage::Inject,
            InjectErrorCode::ConfigInvalid => Stage::Config,
        }
    }
}

impl fmt::Display for InjectErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One step of the path from the injected root to the failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    Field(String),
    Index(usize),
}

/// Injection error with full context
#[derive(Debug)]
pub struct InjectError {
    code: InjectErrorCode,
    message: String,
    /// Resource name if applicable
    source_name: Option<String>,
    /// Type in which the failure happened
    type_name: Option<String>,
    /// Field name the error is about (missing, undeclared or unconvertible)
    field_name: Option<String>,
    /// Innermost segment last
    path: Vec<PathSegment>,
    cause: Option<BoxedCause>,
}

impl InjectError {
    fn new(code: InjectErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            source_name: None,
            type_name: None,
            field_name: None,
            path: Vec::new(),
            cause: None,
        }
    }

    /// Create a load error for an unreadable or malformed resource
    pub fn load_failed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        let name = source_name.into();
        let mut err = Self::new(
            InjectErrorCode::LoadFailed,
            format!("Failed to load value tree '{}': {}", name, reason.into()),
        );
        err.source_name = Some(name);
        err
    }

    /// Create a required-declaration-missing error
    pub fn required_declaration_missing(source_name: impl Into<String>, section: &str) -> Self {
        let name = source_name.into();
        let mut err = Self::new(
            InjectErrorCode::RequiredDeclarationMissing,
            format!("'{}' has no <{}> element", name, section),
        );
        err.source_name = Some(name);
        err
    }

    /// Create a default-declaration-missing error
    pub fn default_declaration_missing(source_name: impl Into<String>, section: &str) -> Self {
        let name = source_name.into();
        let mut err = Self::new(
            InjectErrorCode::DefaultDeclarationMissing,
            format!("'{}' has no <{}> element", name, section),
        );
        err.source_name = Some(name);
        err
    }

    /// Create a required-value-missing error naming the absent field
    pub fn required_value_missing(field: impl Into<String>) -> Self {
        let field = field.into();
        let mut err = Self::new(
            InjectErrorCode::RequiredValueMissing,
            format!("Required value '{}' is not defined in any value tree", field),
        );
        err.field_name = Some(field);
        err
    }

    /// Create a field-not-declared error naming the type and the field
    pub fn field_not_declared(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let field = field.into();
        let mut err = Self::new(
            InjectErrorCode::FieldNotDeclared,
            format!("Type {} has no field with name '{}'", type_name, field),
        );
        err.type_name = Some(type_name);
        err.field_name = Some(field);
        err
    }

    /// Create a scalar conversion error wrapping the parse failure
    pub fn scalar_conversion<E>(expected: impl fmt::Display, value: &str, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        let mut err = Self::new(
            InjectErrorCode::ScalarConversionFailed,
            format!("Cannot convert '{}' to {}: {}", value, expected, cause),
        );
        err.cause = Some(Box::new(cause));
        err
    }

    /// Create a construction error for the given type
    pub fn construction_failed(type_name: impl Into<String>, cause: impl Into<BoxedCause>) -> Self {
        let type_name = type_name.into();
        let cause = cause.into();
        let mut err = Self::new(
            InjectErrorCode::ConstructionFailed,
            format!("Cannot construct {}: {}", type_name, cause),
        );
        err.type_name = Some(type_name);
        err.cause = Some(cause);
        err
    }

    /// Create a configuration error
    pub fn config_invalid(path: impl Into<String>, reason: impl Into<String>) -> Self {
        let path = path.into();
        let mut err = Self::new(
            InjectErrorCode::ConfigInvalid,
            format!("Invalid configuration '{}': {}", path, reason.into()),
        );
        err.source_name = Some(path);
        err
    }

    /// Records that the error surfaced while writing `field` of `type_name`.
    ///
    /// Called on the way out of each composite; the innermost type wins.
    pub fn within_field(mut self, type_name: &str, field: &str) -> Self {
        if self.type_name.is_none() {
            self.type_name = Some(type_name.to_string());
        }
        if self.field_name.is_none() {
            self.field_name = Some(field.to_string());
        }
        self.path.insert(0, PathSegment::Field(field.to_string()));
        self
    }

    /// Records that the error surfaced while converting array element `index`.
    pub fn within_index(mut self, index: usize) -> Self {
        self.path.insert(0, PathSegment::Index(index));
        self
    }

    /// Returns the error code
    pub fn code(&self) -> InjectErrorCode {
        self.code
    }

    /// Returns the stage that raised the error
    pub fn stage(&self) -> Stage {
        self.code.stage()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the resource name if applicable
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Returns the type name if applicable
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Returns the field name if applicable
    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }

    /// Returns the dotted path to the failing value (e.g. `servers[1].port`)
    pub fn field_path(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                PathSegment::Index(i) => {
                    out.push_str(&format!("[{}]", i));
                }
            }
        }
        out
    }
}

impl fmt::Display for InjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[FATAL] {}: {}", self.code.code(), self.message)?;
        if !self.path.is_empty() {
            write!(f, " [at {}]", self.field_path())?;
        }
        Ok(())
    }
}

impl Error for InjectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

/// Result type for injection operations
pub type InjectResult<T> = Result<T, InjectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(InjectErrorCode::LoadFailed.code(), "TREEFILL_LOAD_FAILED");
        assert_eq!(
            InjectErrorCode::RequiredValueMissing.code(),
            "TREEFILL_REQUIRED_VALUE_MISSING"
        );
        assert_eq!(InjectErrorCode::FieldNotDeclared.code(), "TREEFILL_FIELD_NOT_DECLARED");
        assert_eq!(
            InjectErrorCode::ConstructionFailed.code(),
            "TREEFILL_CONSTRUCTION_FAILED"
        );
    }

    #[test]
    fn test_stages() {
        assert_eq!(InjectErrorCode::LoadFailed.stage(), Stage::Load);
        assert_eq!(InjectErrorCode::RequiredDeclarationMissing.stage(), Stage::Merge);
        assert_eq!(InjectErrorCode::ScalarConversionFailed.stage(), Stage::Inject);
        assert_eq!(InjectErrorCode::ConfigInvalid.stage(), Stage::Config);
    }

    #[test]
    fn test_field_not_declared_names_type_and_field() {
        let err = InjectError::field_not_declared("Settings", "doesNotExist");
        assert_eq!(err.type_name(), Some("Settings"));
        assert_eq!(err.field_name(), Some("doesNotExist"));
        assert!(err.message().contains("Settings"));
        assert!(err.message().contains("doesNotExist"));
    }

    #[test]
    fn test_scalar_conversion_keeps_cause() {
        let cause = "abc".parse::<i32>().unwrap_err();
        let err = InjectError::scalar_conversion("int", "abc", cause);
        assert!(err.source().is_some());
        assert!(err.message().contains("abc"));
    }

    #[test]
    fn test_path_is_built_outside_in() {
        let cause = "x".parse::<i32>().unwrap_err();
        let err = InjectError::scalar_conversion("int", "x", cause)
            .within_field("Server", "port")
            .within_index(1)
            .within_field("Cluster", "servers");

        assert_eq!(err.field_path(), "servers[1].port");
        // innermost type is kept
        assert_eq!(err.type_name(), Some("Server"));
        assert_eq!(err.field_name(), Some("port"));
        assert!(format!("{}", err).contains("servers[1].port"));
    }

    #[test]
    fn test_display_format() {
        let err = InjectError::required_value_missing("token");
        let display = format!("{}", err);
        assert!(display.starts_with("[FATAL] TREEFILL_REQUIRED_VALUE_MISSING"));
        assert!(display.contains("token"));
    }
}
