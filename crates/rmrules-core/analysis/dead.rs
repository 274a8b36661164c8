//! Dead-selector filter
//!
//! Removes selector branches that can never match because some compound in
//! the chain requires a class from the never-matches assumption set. The
//! whole chain is walked regardless of position, which covers the class used
//! directly, as an ancestor, and as a descendant in one check. `:not(...)`
//! arguments are opaque pseudo state and deliberately do not trigger the
//! filter.

use crate::analysis::diagnostics::{DiagnosticSink, FindingKind};
use crate::analysis::Action;
use crate::stylesheet::{Selector, Stylesheet};
use crate::utils::hashers::{create_hash_set, Set};
use alloc::format;
use alloc::vec::Vec;

/// Class names (without the `.`) extracted from never-matches selectors
///
/// Only class-form entries (`.name`) participate; `#x` must not kill `.x`.
pub(crate) fn never_class_set<'c>(selectors: &'c [alloc::string::String]) -> Set<&'c str> {
    let mut set = create_hash_set();
    for selector in selectors {
        if let Some(class) = selector.strip_prefix('.') {
            set.insert(class);
        }
    }
    set
}

fn is_dead(selector: &Selector<'_>, never: &Set<&str>) -> bool {
    selector
        .compounds
        .iter()
        .any(|compound| compound.classes.iter().any(|class| never.contains(class)))
}

/// Report and (under `remove`) drop every selector using a never-matching class
pub(crate) fn filter_dead_selectors(
    stylesheet: &mut Stylesheet<'_>,
    never: &Set<&str>,
    action: Action,
    sink: &mut DiagnosticSink,
) {
    if never.is_empty() {
        return;
    }

    for (rule_pos, node) in stylesheet.nodes.iter_mut().enumerate() {
        let Some(rule) = node.as_rule_mut() else {
            continue;
        };

        let selectors = core::mem::take(&mut rule.selectors);
        let mut kept = Vec::with_capacity(selectors.len());
        for (selector_pos, selector) in selectors.into_iter().enumerate() {
            if is_dead(&selector, never) {
                let applied = sink.record(
                    action,
                    FindingKind::DeadSelector,
                    rule_pos,
                    Some(selector_pos),
                    format!("selector `{selector}` is never used"),
                );
                if applied {
                    continue;
                }
            }
            kept.push(selector);
        }
        rule.selectors = kept;
    }
}
