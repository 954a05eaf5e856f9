//! Node-to-value conversion
//!
//! Scalars parse the node's text content with the type's `FromStr`; no
//! trimming is applied. Strings take the text content verbatim. Arrays
//! convert each element child in document order (the array node's own text
//! is ignored). Composites are handled by the `injectable!` macro.

use std::error::Error;
use std::str::FromStr;

use super::classify::FieldClassification;
use crate::errors::{InjectError, InjectResult};
use crate::tree::ValueNode;

/// A type a value-tree node can be converted into.
pub trait FromNode: Sized {
    /// Classification of this type when declared as a field
    fn classification() -> FieldClassification;

    /// Converts `node` into a value of this type
    fn from_node(node: &ValueNode) -> InjectResult<Self>;
}

/// Parses the text content of `node` with `T`'s standard conversion.
pub fn parse_scalar<T>(node: &ValueNode, classification: &FieldClassification) -> InjectResult<T>
where
    T: FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    let text = node.text_content();
    text.parse::<T>()
        .map_err(|e| InjectError::scalar_conversion(classification, &text, e))
}

macro_rules! scalar_from_node {
    ($($ty:ty => $class:ident),* $(,)?) => {
        $(
            impl FromNode for $ty {
                fn classification() -> FieldClassification {
                    FieldClassification::$class
                }

                fn from_node(node: &ValueNode) -> InjectResult<Self> {
                    parse_scalar(node, &FieldClassification::$class)
                }
            }
        )*
    };
}

scalar_from_node! {
    i8 => Byte,
    i16 => Short,
    i32 => Integer,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    bool => Boolean,
    char => Character,
}

impl FromNode for String {
    fn classification() -> FieldClassification {
        FieldClassification::String
    }

    fn from_node(node: &ValueNode) -> InjectResult<Self> {
        Ok(node.text_content())
    }
}

impl<T: FromNode> FromNode for Vec<T> {
    fn classification() -> FieldClassification {
        FieldClassification::Array(Box::new(T::classification()))
    }

    fn from_node(node: &ValueNode) -> InjectResult<Self> {
        node.element_children()
            .enumerate()
            .map(|(i, child)| T::from_node(child).map_err(|e| e.within_index(i)))
            .collect()
    }
}

impl<T: FromNode> FromNode for Box<[T]> {
    fn classification() -> FieldClassification {
        <Vec<T> as FromNode>::classification()
    }

    fn from_node(node: &ValueNode) -> InjectResult<Self> {
        <Vec<T> as FromNode>::from_node(node).map(Vec::into_boxed_slice)
    }
}
