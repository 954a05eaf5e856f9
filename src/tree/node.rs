//! In-memory value tree
//!
//! A value tree mirrors the element structure of the source document.
//! Element nodes carry a name and ordered children; text nodes carry a
//! payload and use the name `#text`. After pruning, the only text nodes left
//! are those with non-blank content.

use serde::Serialize;

/// Name reported by text nodes.
pub const TEXT_NODE_NAME: &str = "#text";

/// Node kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
    /// Named element with ordered children
    Element,
    /// Character data
    Text {
        /// Raw text, entity references already resolved
        content: String,
    },
}

/// A node of a value tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueNode {
    name: String,
    #[serde(flatten)]
    kind: NodeKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<ValueNode>,
}

impl ValueNode {
    /// Create an element node with the given children
    pub fn element(name: impl Into<String>, children: Vec<ValueNode>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Element,
            children,
        }
    }

    /// Create a text node
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            name: TEXT_NODE_NAME.to_string(),
            kind: NodeKind::Text {
                content: content.into(),
            },
            children: Vec::new(),
        }
    }

    /// Create an element holding a single text payload, e.g. `<retries>3</retries>`
    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::element(name, vec![Self::text(value)])
    }

    /// Create an element with no children, e.g. `<token/>`
    pub fn empty(name: impl Into<String>) -> Self {
        Self::element(name, Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element)
    }

    /// All children, element and text, in document order
    pub fn children(&self) -> &[ValueNode] {
        &self.children
    }

    /// Element children only, in document order
    pub fn element_children(&self) -> impl Iterator<Item = &ValueNode> {
        self.children.iter().filter(|c| c.is_element())
    }

    /// True when the node has no element children
    pub fn is_leaf(&self) -> bool {
        self.element_children().next().is_none()
    }

    /// Concatenated text of this node and all its descendants.
    ///
    /// An empty element yields `""`.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Text { content } => out.push_str(content),
            NodeKind::Element => {
                for child in &self.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Append a child, merging adjacent text nodes.
    pub(crate) fn push_child(&mut self, child: ValueNode) {
        if let NodeKind::Text { content: incoming } = &child.kind {
            if let Some(ValueNode {
                kind: NodeKind::Text { content },
                ..
            }) = self.children.last_mut()
            {
                content.push_str(incoming);
                return;
            }
        }
        self.children.push(child);
    }

    /// Consumes the node and returns its children
    pub fn into_children(self) -> Vec<ValueNode> {
        self.children
    }

    /// Removes blank text children, recursively.
    ///
    /// Descendants are pruned before this node's own children are examined.
    /// A child survives when it is an element or carries non-blank text.
    pub fn prune_whitespace(&mut self) {
        for child in self.children.iter_mut() {
            child.prune_whitespace();
        }
        self.children.retain(|child| match &child.kind {
            NodeKind::Element => true,
            NodeKind::Text { content } => !is_blank(content),
        });
    }
}

/// Entirely whitespace, including empty
pub(crate) fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}
