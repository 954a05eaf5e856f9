//! Value tree loader
//!
//! Reads a named document through a [`ResourceResolver`], parses it and
//! returns the root element's immediate element children, each with blank
//! text pruned from its whole subtree.
//!
//! Unreadable resources and malformed markup are load errors. No partial
//! tree is ever returned.
//!
//! General entities declared with a literal value in the internal DOCTYPE
//! subset are expanded, alongside the five predefined ones. External and
//! parameter entities are not; a reference to one is a load error.

use std::collections::HashMap;

use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use regex::Regex;

use super::node::{is_blank, ValueNode};
use super::resolver::ResourceResolver;
use crate::errors::{InjectError, InjectResult};
use crate::observability::{log_event_with_fields, Event};

/// Loads value trees by name.
pub struct TreeLoader<R> {
    resolver: R,
}

impl<R: ResourceResolver> TreeLoader<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Loads `source_name` and returns its pruned top-level elements.
    pub fn load(&self, source_name: &str) -> InjectResult<Vec<ValueNode>> {
        let bytes = self.resolver.resolve(source_name)?;
        let nodes = parse_top_level(source_name, &bytes)?;

        let count = nodes.len().to_string();
        log_event_with_fields(
            Event::ValueTreeLoaded,
            &[("source", source_name), ("top_level_nodes", count.as_str())],
        );

        Ok(nodes)
    }
}

/// Parses `bytes` and returns the root's pruned element children.
pub fn parse_top_level(source_name: &str, bytes: &[u8]) -> InjectResult<Vec<ValueNode>> {
    let root = parse_document(source_name, bytes)?;

    Ok(root
        .into_children()
        .into_iter()
        .filter(ValueNode::is_element)
        .map(|mut node| {
            node.prune_whitespace();
            node
        })
        .collect())
}

/// `<!ENTITY name "value">` or `<!ENTITY name 'value'>`
const ENTITY_DECL_PATTERN: &str =
    r#"<!ENTITY\s+([A-Za-z_][A-Za-z0-9_.\-]*)\s+(?:"([^"]*)"|'([^']*)')\s*>"#;

const PREDEFINED_ENTITIES: [(&str, &str); 5] = [
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("apos", "'"),
    ("quot", "\""),
];

/// Parses `bytes` into a single root element, without pruning.
///
/// Adjacent text and CDATA are merged into one text node. Comments,
/// processing instructions, the XML declaration and doctype are dropped
/// once the doctype's internal entities are recorded. Attributes are
/// ignored.
pub fn parse_document(source_name: &str, bytes: &[u8]) -> InjectResult<ValueNode> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| InjectError::load_failed(source_name, format!("Invalid UTF-8: {}", e)))?;

    let mut reader = Reader::from_str(text);
    let mut open: Vec<ValueNode> = Vec::new();
    let mut root: Option<ValueNode> = None;
    let mut entities: HashMap<String, String> = PREDEFINED_ENTITIES
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    loop {
        let event = reader.read_event().map_err(|e| {
            InjectError::load_failed(
                source_name,
                format!("Malformed markup at byte {}: {}", reader.buffer_position(), e),
            )
        })?;

        match event {
            XmlEvent::Start(start) => {
                let name = element_name(source_name, start.name().as_ref())?;
                open.push(ValueNode::empty(name));
            }
            XmlEvent::Empty(start) => {
                let name = element_name(source_name, start.name().as_ref())?;
                attach(source_name, &mut open, &mut root, ValueNode::empty(name))?;
            }
            XmlEvent::End(_) => {
                let node = open.pop().ok_or_else(|| {
                    InjectError::load_failed(source_name, "Closing tag without opening tag")
                })?;
                attach(source_name, &mut open, &mut root, node)?;
            }
            XmlEvent::DocType(raw) => {
                let declarations = String::from_utf8_lossy(&raw).into_owned();
                entities.extend(internal_entities(source_name, &declarations)?);
            }
            XmlEvent::Text(raw) => {
                let content = raw
                    .unescape_with(|name| entities.get(name).map(String::as_str))
                    .map_err(|e| {
                        InjectError::load_failed(source_name, format!("Bad text content: {}", e))
                    })?;
                add_text(source_name, &mut open, &content)?;
            }
            XmlEvent::CData(raw) => {
                let content = String::from_utf8(raw.into_inner().into_owned()).map_err(|e| {
                    InjectError::load_failed(source_name, format!("Bad CDATA content: {}", e))
                })?;
                add_text(source_name, &mut open, &content)?;
            }
            XmlEvent::Eof => break,
            // Comments, declarations, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(InjectError::load_failed(
            source_name,
            format!("Unclosed element <{}>", unclosed.name()),
        ));
    }

    root.ok_or_else(|| InjectError::load_failed(source_name, "Document has no root element"))
}

/// Literal general entities declared in a doctype's internal subset.
fn internal_entities(source_name: &str, doctype: &str) -> InjectResult<Vec<(String, String)>> {
    let pattern = Regex::new(ENTITY_DECL_PATTERN).map_err(|e| {
        InjectError::load_failed(source_name, format!("Entity pattern failed: {}", e))
    })?;

    Ok(pattern
        .captures_iter(doctype)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_string();
            let value = caps.get(2).or_else(|| caps.get(3))?.as_str().to_string();
            Some((name, value))
        })
        .collect())
}

fn element_name(source_name: &str, raw: &[u8]) -> InjectResult<String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| InjectError::load_failed(source_name, format!("Bad element name: {}", e)))
}

/// Attaches a finished element to its parent, or makes it the root.
fn attach(
    source_name: &str,
    open: &mut [ValueNode],
    root: &mut Option<ValueNode>,
    node: ValueNode,
) -> InjectResult<()> {
    match open.last_mut() {
        Some(parent) => {
            parent.push_child(node);
            Ok(())
        }
        None if root.is_some() => Err(InjectError::load_failed(
            source_name,
            format!("Second root element <{}>", node.name()),
        )),
        None => {
            *root = Some(node);
            Ok(())
        }
    }
}

fn add_text(source_name: &str, open: &mut [ValueNode], content: &str) -> InjectResult<()> {
    match open.last_mut() {
        Some(parent) => {
            parent.push_child(ValueNode::text(content));
            Ok(())
        }
        None if is_blank(content) => Ok(()),
        None => Err(InjectError::load_failed(
            source_name,
            "Text content outside the root element",
        )),
    }
}
