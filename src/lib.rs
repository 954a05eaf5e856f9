//! treefill - populate typed values from XML value trees
//!
//! A destination type declares its fields with [`injectable!`]. A generated
//! default-values document supplies defaults and required names for the
//! type; a test supplies an override document with the values that matter
//! to it. The engine loads both, merges them, checks every required name is
//! present, and builds a fully populated value.
//!
//! ```ignore
//! use treefill::{injectable, InjectConfig, InjectionEngine};
//!
//! injectable! {
//!     #[derive(Debug, Default)]
//!     pub struct BuildMojo {
//!         pub retries: i32,
//!         pub token: String,
//!     }
//! }
//!
//! let config = InjectConfig::default();
//! let engine = InjectionEngine::new(config.resolver(), config);
//! let mojo: BuildMojo = engine.inject("build-case.xml")?;
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod generator;
pub mod inject;
pub mod merge;
pub mod observability;
pub mod policy;
pub mod tree;

pub use config::InjectConfig;
pub use errors::{InjectError, InjectErrorCode, InjectResult, Stage};
pub use inject::{Injectable, Injected, InjectionEngine, InjectionPoint, TestInstance};
pub use merge::EffectiveValueTree;
pub use tree::ValueNode;
