//! Value tree subsystem
//!
//! Parses hierarchical XML documents into ordered [`ValueNode`] trees.
//!
//! # Rules
//!
//! - Documents are addressed by name through a [`ResourceResolver`]
//! - Loading returns the root element's element children, in order
//! - Blank text is pruned from every returned subtree
//! - Malformed input is a hard failure, never partially returned

mod loader;
mod node;
mod resolver;

pub use loader::{parse_document, parse_top_level, TreeLoader};
pub use node::{NodeKind, ValueNode, TEXT_NODE_NAME};
pub use resolver::{DirectoryResolver, MemoryResolver, ResourceResolver};
