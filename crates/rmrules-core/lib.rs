//! # rmrules-core
//!
//! Build-time CSS cascade analyzer. Proves, over selector structure and
//! cascade order alone, that one rule's effect on an element is always masked
//! by another rule, then removes the masked selectors and declarations
//! without changing the rendered result.
//!
//! Parsing stylesheet text and selector strings is an external concern: the
//! engine consumes the typed model in [`stylesheet`] (one pass, in-place
//! mutation by deletion only) and emits structured [`Finding`]s for the host
//! to render.
//!
//! ## Features
//!
//! - **Assumption-driven proofs**: user-supplied "never matches" and "always
//!   matches" selector sets sharpen the override analysis
//! - **Signature bucketing**: candidate pairs are grouped by chain token
//!   signature, so unrelated selectors are never compared
//! - **Conservative by construction**: every removal is backed by a
//!   structural subsumption proof; anything unproven is left untouched
//! - **Policy-routed diagnostics**: each finding category is independently
//!   ignored, warned, errored, or removed, with a reporting budget
//!
//! ## Quick Start
//!
//! ```rust
//! use rmrules_core::{analyze, AnalysisConfig, Action};
//! use rmrules_core::stylesheet::{Compound, Declaration, Node, Rule, Selector, Stylesheet};
//!
//! // `.x { color: red; }` as the external parser would hand it over.
//! let mut stylesheet = Stylesheet {
//!     nodes: vec![Node::Rule(Rule {
//!         selectors: vec![Selector {
//!             compounds: vec![Compound { classes: vec!["x"], ..Compound::default() }],
//!         }],
//!         declarations: vec![Declaration { property: "color", value: "red" }],
//!     })],
//! };
//!
//! let config = AnalysisConfig::default()
//!     .with_assume_never_matches(vec![".x".into()])
//!     .with_on_dead_selector(Action::Remove);
//!
//! let report = analyze(&mut stylesheet, &config)?;
//! assert_eq!(report.remove_count, 1);
//! assert!(stylesheet.nodes.is_empty());
//! # Ok::<(), rmrules_core::CoreError>(())
//! ```
//!
//! ## Performance Targets
//!
//! - One synchronous pass per stylesheet, bounded by the number of
//!   same-signature candidate pairs
//! - Zero-copy model: `&str` spans into the parser's source text
//! - No global state; every run owns a fresh diagnostics accumulator

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::all)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod analysis;
pub mod stylesheet;
pub mod utils;

pub use analysis::{
    analyze, always_overrides, Action, AlwaysSet, AnalysisConfig, CombinatorMode, Finding,
    FindingKind, Report,
};
pub use stylesheet::{
    AtRule, Attribute, Combinator, Comment, Compound, Declaration, Node, Pseudo, Rule, Selector,
    Stylesheet,
};
pub use utils::CoreError;

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for engine operations, using the crate's unified [`CoreError`].
pub type Result<T> = core::result::Result<T, CoreError>;
