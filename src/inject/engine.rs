//! Injection engine
//!
//! Runs the Load → Merge/Validate → Inject pipeline for one destination
//! type and one override document. Every call builds its own trees and its
//! own instance; nothing is shared between calls.

use uuid::Uuid;

use super::target::{populate, Injectable};
use crate::config::InjectConfig;
use crate::errors::InjectResult;
use crate::merge::{EffectiveValueTree, ValueTreeMerger};
use crate::observability::ObservationScope;
use crate::tree::{ResourceResolver, TreeLoader};

/// Entry point used by test hosts.
pub struct InjectionEngine<R> {
    loader: TreeLoader<R>,
    config: InjectConfig,
}

impl<R: ResourceResolver> InjectionEngine<R> {
    pub fn new(resolver: R, config: InjectConfig) -> Self {
        Self {
            loader: TreeLoader::new(resolver),
            config,
        }
    }

    /// Loads, merges and validates the value trees for `type_name`.
    pub fn effective_tree(
        &self,
        type_name: &str,
        override_source: &str,
    ) -> InjectResult<EffectiveValueTree> {
        ValueTreeMerger::new(&self.loader, &self.config).merge(type_name, override_source)
    }

    /// Builds a fully populated `T` from its defaults and `override_source`.
    pub fn inject<T: Injectable>(&self, override_source: &str) -> InjectResult<T> {
        self.observed(T::type_name(), override_source, |tree| {
            populate::<T>(tree.nodes())
        })
    }

    /// Fills every injection point of a test instance, in order.
    ///
    /// The first failure aborts; points already filled keep their values.
    pub fn inject_into(&self, instance: &mut dyn TestInstance) -> InjectResult<()> {
        for point in instance.injection_points() {
            let type_name = point.type_name();
            let override_source = point.override_source().to_string();
            self.observed(type_name, &override_source, |tree| point.fill(tree))?;
        }
        Ok(())
    }

    /// Runs one injection inside an `INJECTION` scope with a fresh id.
    fn observed<V>(
        &self,
        type_name: &str,
        override_source: &str,
        build: impl FnOnce(&EffectiveValueTree) -> InjectResult<V>,
    ) -> InjectResult<V> {
        let injection_id = Uuid::new_v4().to_string();
        let scope = ObservationScope::with_fields(
            "INJECTION",
            &[
                ("injection_id", injection_id.as_str()),
                ("overrides", override_source),
                ("type", type_name),
            ],
        );

        match self
            .effective_tree(type_name, override_source)
            .and_then(|tree| build(&tree))
        {
            Ok(value) => {
                scope.complete();
                Ok(value)
            }
            Err(err) => {
                scope.fail(&err.to_string());
                Err(err)
            }
        }
    }
}

/// A field of a test instance that requests injection.
pub trait InjectionPoint {
    /// Simple name of the destination type
    fn type_name(&self) -> &'static str;

    /// Name of the override document supplied by the test
    fn override_source(&self) -> &str;

    /// Builds the destination value from `tree` and stores it
    fn fill(&mut self, tree: &EffectiveValueTree) -> InjectResult<()>;
}

/// A test instance exposing its injection points.
pub trait TestInstance {
    fn injection_points(&mut self) -> Vec<&mut dyn InjectionPoint>;
}

/// Slot holding an injected value of type `T`.
///
/// Empty until an engine fills it.
#[derive(Debug)]
pub struct Injected<T> {
    override_source: String,
    value: Option<T>,
}

impl<T> Injected<T> {
    /// Empty slot that will be filled from `override_source`
    pub fn from_source(override_source: impl Into<String>) -> Self {
        Self {
            override_source: override_source.into(),
            value: None,
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_filled(&self) -> bool {
        self.value.is_some()
    }

    pub fn into_inner(self) -> Option<T> {
        self.value
    }
}

impl<T: Injectable> InjectionPoint for Injected<T> {
    fn type_name(&self) -> &'static str {
        T::type_name()
    }

    fn override_source(&self) -> &str {
        &self.override_source
    }

    fn fill(&mut self, tree: &EffectiveValueTree) -> InjectResult<()> {
        self.value = Some(populate::<T>(tree.nodes())?);
        Ok(())
    }
}
