//! Resource resolution for value-tree documents
//!
//! The engine names documents; a resolver turns a name into bytes. Where the
//! bytes come from (a directory, a bundle compiled into the test binary) is
//! up to the resolver.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{InjectError, InjectResult};

/// Turns a resource name into its byte content.
pub trait ResourceResolver {
    /// Returns the bytes of `name`, or a load error when it cannot be read.
    fn resolve(&self, name: &str) -> InjectResult<Vec<u8>>;
}

impl<R: ResourceResolver + ?Sized> ResourceResolver for &R {
    fn resolve(&self, name: &str) -> InjectResult<Vec<u8>> {
        (**self).resolve(name)
    }
}

/// Resolves names relative to an ordered list of root directories.
///
/// The first root containing the resource wins.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    roots: Vec<PathBuf>,
}

impl DirectoryResolver {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Resolver with a single root directory
    pub fn single(root: &Path) -> Self {
        Self {
            roots: vec![root.to_path_buf()],
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Returns the path `name` resolves to, if any root holds it.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        self.roots
            .iter()
            .map(|root| root.join(name))
            .find(|path| path.is_file())
    }
}

impl ResourceResolver for DirectoryResolver {
    fn resolve(&self, name: &str) -> InjectResult<Vec<u8>> {
        let path = self.locate(name).ok_or_else(|| {
            InjectError::load_failed(
                name,
                format!("resource not found in {} root(s)", self.roots.len()),
            )
        })?;

        fs::read(&path).map_err(|e| {
            InjectError::load_failed(name, format!("Failed to read {}: {}", path.display(), e))
        })
    }
}

/// Named documents held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    resources: HashMap<String, Vec<u8>>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a named document
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.resources.insert(name.into(), content.into());
    }

    /// Builder form of [`MemoryResolver::insert`]
    pub fn with(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resources.contains_key(name)
    }
}

impl ResourceResolver for MemoryResolver {
    fn resolve(&self, name: &str) -> InjectResult<Vec<u8>> {
        self.resources
            .get(name)
            .cloned()
            .ok_or_else(|| InjectError::load_failed(name, "resource not found"))
    }
}
