//! Merge output types

use serde::Serialize;

use crate::errors::{InjectError, InjectResult};
use crate::tree::ValueNode;

/// The merged, ordered top-level nodes handed to the injector.
///
/// Names are not deduplicated. Built once per injection and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EffectiveValueTree {
    nodes: Vec<ValueNode>,
}

impl EffectiveValueTree {
    pub(crate) fn new(nodes: Vec<ValueNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[ValueNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level names in sequence order, duplicates included
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(ValueNode::name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    /// First node carrying `name` in sequence order
    pub fn first(&self, name: &str) -> Option<&ValueNode> {
        self.nodes.iter().find(|n| n.name() == name)
    }
}

/// Field names that must appear in the effective tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredNameSet {
    names: Vec<String>,
}

impl RequiredNameSet {
    /// Builds the set from the element children of a required section.
    ///
    /// Declaration order is kept so the first missing name is deterministic.
    pub fn from_section(section: &ValueNode) -> Self {
        let mut names: Vec<String> = Vec::new();
        for child in section.element_children() {
            if !names.iter().any(|n| n == child.name()) {
                names.push(child.name().to_string());
            }
        }
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Fails on the first required name that has no node in `tree`.
    pub fn validate(&self, tree: &EffectiveValueTree) -> InjectResult<()> {
        match self.names.iter().find(|name| !tree.contains(name)) {
            Some(missing) => Err(InjectError::required_value_missing(missing.as_str())),
            None => Ok(()),
        }
    }
}
