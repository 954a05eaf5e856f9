//! Field classification and target descriptors
//!
//! Supported classifications:
//! - byte, short, int, long: `i8`, `i16`, `i32`, `i64`
//! - float, double: `f32`, `f64`
//! - boolean, char: `bool`, `char`
//! - string: `String`
//! - array: `Vec<T>` / `Box<[T]>` of any supported element
//! - composite: any type declared with `injectable!`

use std::fmt;

/// Classification of a destination field's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldClassification {
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    Character,
    String,
    /// Array with its element classification (boxed to allow nesting)
    Array(Box<FieldClassification>),
    /// Composite populated recursively, with its type name
    Composite(std::string::String),
}

impl FieldClassification {
    /// Returns the type name for messages
    pub fn type_name(&self) -> &str {
        match self {
            FieldClassification::Byte => "byte",
            FieldClassification::Short => "short",
            FieldClassification::Integer => "int",
            FieldClassification::Long => "long",
            FieldClassification::Float => "float",
            FieldClassification::Double => "double",
            FieldClassification::Boolean => "boolean",
            FieldClassification::Character => "char",
            FieldClassification::String => "string",
            FieldClassification::Array(_) => "array",
            FieldClassification::Composite(name) => name,
        }
    }

    /// True for the numeric, boolean, character and string classifications
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            FieldClassification::Array(_) | FieldClassification::Composite(_)
        )
    }

    /// Element classification of an array, `None` otherwise
    pub fn element(&self) -> Option<&FieldClassification> {
        match self {
            FieldClassification::Array(element) => Some(element),
            _ => None,
        }
    }
}

impl fmt::Display for FieldClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldClassification::Array(element) => write!(f, "{}[]", element),
            other => write!(f, "{}", other.type_name()),
        }
    }
}

/// A declared field of a target type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    classification: FieldClassification,
}

impl FieldDescriptor {
    pub fn new(name: &'static str, classification: FieldClassification) -> Self {
        Self {
            name,
            classification,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn classification(&self) -> &FieldClassification {
        &self.classification
    }
}

/// The declared fields of a target type, in declaration order.
///
/// Derived on demand for every injection; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    type_name: &'static str,
    fields: Vec<FieldDescriptor>,
}

impl TargetDescriptor {
    pub fn new(type_name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self { type_name, fields }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// First field in declaration order named `name`
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}
