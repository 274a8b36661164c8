//! Cascade override analysis and redundancy elimination
//!
//! One synchronous pass over a parsed stylesheet: dead-selector filtering,
//! root-tag placement validation, candidate indexing, the override proof,
//! declaration/selector reduction, and rule pruning, with every finding
//! routed through the diagnostics accumulator before any mutation is
//! applied.
//!
//! # Example
//!
//! ```rust
//! use rmrules_core::{analyze, Action, AnalysisConfig};
//! use rmrules_core::stylesheet::{Compound, Declaration, Node, Rule, Selector, Stylesheet};
//!
//! // `.y { color: red; } .y { color: blue; }` — the later rule always wins.
//! let rule = |value| {
//!     Node::Rule(Rule {
//!         selectors: vec![Selector {
//!             compounds: vec![Compound { classes: vec!["y"], ..Compound::default() }],
//!         }],
//!         declarations: vec![Declaration { property: "color", value }],
//!     })
//! };
//! let mut stylesheet = Stylesheet { nodes: vec![rule("red"), rule("blue")] };
//!
//! let config = AnalysisConfig::default().with_on_override(Action::Remove);
//! let report = analyze(&mut stylesheet, &config)?;
//!
//! assert_eq!(report.remove_count, 1);
//! assert_eq!(stylesheet.to_string(), ".y{color:blue;}");
//! # Ok::<(), rmrules_core::CoreError>(())
//! ```

use crate::stylesheet::Stylesheet;
use crate::Result;
use alloc::string::String;

mod body_position;
mod config;
mod dead;
mod diagnostics;
mod index;
pub mod overrides;
mod reduce;

pub use config::{Action, AnalysisConfig};
pub use diagnostics::{Finding, FindingKind, Report};
pub use overrides::{always_overrides, AlwaysSet, CombinatorMode};

use crate::utils::CoreError;
use diagnostics::DiagnosticSink;

/// Analyze one stylesheet and remove what is provably redundant
///
/// Mutates `stylesheet` in place by deletion only, per the policies in
/// `config`. Categories set to [`Action::Ignore`] are not checked at all;
/// `warn`/`error` categories are reported but leave the stylesheet correct
/// and unoptimized. Returns the accumulated [`Report`], or
/// [`CoreError::AnalysisFailed`] after the full pass when any finding was
/// classified as an error — `remove`-policy mutations made during the same
/// run stay applied.
///
/// # Errors
///
/// [`CoreError::Config`] when the assumption sets overlap;
/// [`CoreError::AnalysisFailed`] when `error_count > 0` after the pass.
pub fn analyze(stylesheet: &mut Stylesheet<'_>, config: &AnalysisConfig) -> Result<Report> {
    config.validate()?;

    let mut sink = DiagnosticSink::new(config.max_reported);

    if config.on_dead_selector != Action::Ignore {
        let never = dead::never_class_set(&config.assume_never_matches);
        dead::filter_dead_selectors(stylesheet, &never, config.on_dead_selector, &mut sink);
    }

    if config.on_invalid_body_position != Action::Ignore {
        body_position::validate_body_position(
            stylesheet,
            config.on_invalid_body_position,
            &mut sink,
        );
    }

    if config.on_override != Action::Ignore {
        let always =
            AlwaysSet::from_selectors(config.assume_always_matches.iter().map(String::as_str));
        let selector_index = index::build_index(stylesheet, &always);
        let mut edges = overrides::calculate_override_edges(stylesheet, &selector_index, &always);
        edges.extend(overrides::calculate_importance_edges(
            stylesheet,
            &selector_index.occurrences,
            &always,
        ));
        reduce::reduce_overridden(
            stylesheet,
            &edges,
            &selector_index.occurrences,
            config.on_override,
            &mut sink,
        );
    }

    reduce::prune_empty_rules(stylesheet);

    let report = sink.into_report();
    if report.has_errors() {
        Err(CoreError::AnalysisFailed(report))
    } else {
        Ok(report)
    }
}
