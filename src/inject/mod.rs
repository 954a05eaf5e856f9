//! Type-directed injection
//!
//! Turns an [`EffectiveValueTree`](crate::merge::EffectiveValueTree) into a
//! fully constructed value of a destination type.
//!
//! # Rules
//!
//! - Every node must name a declared field of the destination type
//! - Scalars are parsed from the node's text content, untrimmed
//! - Arrays take one element per element child, in order
//! - Composites are built recursively from the node's children
//! - The first failure aborts; no partially built value escapes

mod classify;
mod convert;
mod engine;
mod target;

pub use classify::{FieldClassification, FieldDescriptor, TargetDescriptor};
pub use convert::{parse_scalar, FromNode};
pub use engine::{InjectionEngine, InjectionPoint, Injected, TestInstance};
pub use target::{construct_default, populate, Injectable};
