//! Merge & validate subsystem
//!
//! Produces the [`EffectiveValueTree`] for one injection request from a
//! type's default-values document and a test's override document.
//!
//! # Rules
//!
//! - The default-values document must hold a required section and a
//!   defaults section
//! - Sequence order is leftover sections, then defaults, then overrides
//! - Names are never deduplicated
//! - Every required name must appear at least once; the first absent name
//!   aborts the request

mod merger;
mod types;

pub use merger::{merge_trees, ValueTreeMerger};
pub use types::{EffectiveValueTree, RequiredNameSet};
