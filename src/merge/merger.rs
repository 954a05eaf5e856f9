//! Value tree merger
//!
//! Combines the default-values document of a type with a test's override
//! document:
//!
//! ```text
//! [leftover sections] ++ [defaultValues children] ++ [override nodes]
//! ```
//!
//! then checks every name in the `requiredValues` section is present.
//! Validation happens before any object is constructed.

use crate::config::InjectConfig;
use crate::errors::{InjectError, InjectResult};
use crate::observability::{log_event_with_fields, Event};
use crate::tree::{ResourceResolver, TreeLoader, ValueNode};

use super::types::{EffectiveValueTree, RequiredNameSet};

/// Loads and merges the value trees for one injection request.
pub struct ValueTreeMerger<'a, R> {
    loader: &'a TreeLoader<R>,
    config: &'a InjectConfig,
}

impl<'a, R: ResourceResolver> ValueTreeMerger<'a, R> {
    pub fn new(loader: &'a TreeLoader<R>, config: &'a InjectConfig) -> Self {
        Self { loader, config }
    }

    /// Builds the effective tree for `type_name` with the overrides in
    /// `override_source`.
    pub fn merge(&self, type_name: &str, override_source: &str) -> InjectResult<EffectiveValueTree> {
        let defaults_name = self.config.default_values_name(type_name);
        let document = self.loader.load(&defaults_name)?;
        let overrides = self.loader.load(override_source)?;

        let tree = merge_trees(self.config, &defaults_name, document, overrides)?;

        let count = tree.len().to_string();
        log_event_with_fields(
            Event::ValueTreeMerged,
            &[
                ("defaults", defaults_name.as_str()),
                ("nodes", count.as_str()),
                ("overrides", override_source),
                ("type", type_name),
            ],
        );

        Ok(tree)
    }
}

/// Merges an already loaded default-values document with override nodes.
///
/// `document` is the top-level sequence of the default-values document;
/// `defaults_name` only labels errors.
pub fn merge_trees(
    config: &InjectConfig,
    defaults_name: &str,
    document: Vec<ValueNode>,
    overrides: Vec<ValueNode>,
) -> InjectResult<EffectiveValueTree> {
    let mut leftover = document;

    let required_section = take_section(&mut leftover, &config.required_section)
        .ok_or_else(|| {
            InjectError::required_declaration_missing(defaults_name, &config.required_section)
        })?;
    let defaults_section = take_section(&mut leftover, &config.defaults_section)
        .ok_or_else(|| {
            InjectError::default_declaration_missing(defaults_name, &config.defaults_section)
        })?;

    let required = RequiredNameSet::from_section(&required_section);

    let mut nodes = leftover;
    nodes.extend(defaults_section.into_children());
    nodes.extend(overrides);
    let tree = EffectiveValueTree::new(nodes);

    if let Err(err) = required.validate(&tree) {
        let field = err.field_name().unwrap_or_default().to_string();
        log_event_with_fields(
            Event::RequiredValueMissing,
            &[("field", field.as_str()), ("source", defaults_name)],
        );
        return Err(err);
    }

    Ok(tree)
}

/// Removes and returns the first top-level section named `name`.
fn take_section(nodes: &mut Vec<ValueNode>, name: &str) -> Option<ValueNode> {
    let index = nodes.iter().position(|n| n.name() == name)?;
    Some(nodes.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::InjectErrorCode;
    use crate::tree::MemoryResolver;

    fn defaults_document() -> Vec<ValueNode> {
        vec![
            ValueNode::element("defaultValues", vec![ValueNode::leaf("retries", "3")]),
            ValueNode::element("requiredValues", vec![ValueNode::empty("token")]),
        ]
    }

    fn names(tree: &EffectiveValueTree) -> Vec<&str> {
        tree.names().collect()
    }

    #[test]
    fn test_merge_order() {
        let mut document = defaults_document();
        document.insert(0, ValueNode::leaf("extra", "e"));
        let overrides = vec![ValueNode::leaf("token", "abc")];

        let tree = merge_trees(&InjectConfig::default(), "T", document, overrides).unwrap();
        assert_eq!(names(&tree), vec!["extra", "retries", "token"]);
    }

    #[test]
    fn test_missing_required_value() {
        let err = merge_trees(&InjectConfig::default(), "T", defaults_document(), vec![]).unwrap_err();
        assert_eq!(err.code(), InjectErrorCode::RequiredValueMissing);
        assert_eq!(err.field_name(), Some("token"));
    }

    #[test]
    fn test_required_satisfied_by_default() {
        let document = vec![
            ValueNode::element("defaultValues", vec![ValueNode::leaf("token", "d")]),
            ValueNode::element("requiredValues", vec![ValueNode::empty("token")]),
        ];
        let tree = merge_trees(&InjectConfig::default(), "T", document, vec![]).unwrap();
        assert_eq!(names(&tree), vec!["token"]);
    }

    #[test]
    fn test_missing_required_section() {
        let document = vec![ValueNode::element("defaultValues", vec![])];
        let err = merge_trees(&InjectConfig::default(), "T-default-values.xml", document, vec![])
            .unwrap_err();
        assert_eq!(err.code(), InjectErrorCode::RequiredDeclarationMissing);
        assert!(err.message().contains("requiredValues"));
    }

    #[test]
    fn test_missing_defaults_section() {
        let document = vec![ValueNode::element("requiredValues", vec![])];
        let err = merge_trees(&InjectConfig::default(), "T", document, vec![]).unwrap_err();
        assert_eq!(err.code(), InjectErrorCode::DefaultDeclarationMissing);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let overrides = vec![ValueNode::leaf("retries", "7"), ValueNode::leaf("token", "t")];
        let tree = merge_trees(&InjectConfig::default(), "T", defaults_document(), overrides).unwrap();
        assert_eq!(names(&tree), vec!["retries", "retries", "token"]);
        assert_eq!(tree.first("retries").unwrap().text_content(), "3");
    }

    #[test]
    fn test_merger_loads_both_documents() {
        let resolver = MemoryResolver::new()
            .with(
                "Mojo-default-values.xml",
                "<values><defaultValues><retries>3</retries></defaultValues>\
                 <requiredValues><token/></requiredValues></values>",
            )
            .with("case.xml", "<overrides><token>abc</token></overrides>");
        let loader = TreeLoader::new(resolver);
        let config = InjectConfig::default();

        let tree = ValueTreeMerger::new(&loader, &config).merge("Mojo", "case.xml").unwrap();
        assert_eq!(names(&tree), vec!["retries", "token"]);
    }

    #[test]
    fn test_merger_missing_defaults_document() {
        let loader = TreeLoader::new(MemoryResolver::new().with("case.xml", "<o/>"));
        let config = InjectConfig::default();
        let err = ValueTreeMerger::new(&loader, &config).merge("Mojo", "case.xml").unwrap_err();
        assert_eq!(err.code(), InjectErrorCode::LoadFailed);
        assert_eq!(err.source_name(), Some("Mojo-default-values.xml"));
    }
}
