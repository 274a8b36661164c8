//! Body-position validator
//!
//! A compound naming the document-root tag can only match as the outermost
//! (leftmost as written) node of a chain; a selector such as `.y body` places
//! the root tag under an ancestor and can never match a real document. This
//! is a structural sanity check independent of the override logic.

use crate::analysis::diagnostics::{DiagnosticSink, FindingKind};
use crate::analysis::Action;
use crate::stylesheet::{Selector, Stylesheet};
use alloc::format;
use alloc::vec::Vec;

/// Document root tag; tag matching in HTML is ASCII case-insensitive
const ROOT_TAG: &str = "body";

fn root_tag_misplaced(selector: &Selector<'_>) -> bool {
    // Compounds are stored key-first; the last entry is the outermost node,
    // the only position where the root tag may appear.
    let chain_len = selector.compounds.len();
    selector.compounds.iter().enumerate().any(|(i, compound)| {
        i + 1 < chain_len
            && compound
                .tag
                .is_some_and(|tag| tag.eq_ignore_ascii_case(ROOT_TAG))
    })
}

/// Report and (under `remove`) drop selectors placing the root tag under an ancestor
pub(crate) fn validate_body_position(
    stylesheet: &mut Stylesheet<'_>,
    action: Action,
    sink: &mut DiagnosticSink,
) {
    for (rule_pos, node) in stylesheet.nodes.iter_mut().enumerate() {
        let Some(rule) = node.as_rule_mut() else {
            continue;
        };

        let selectors = core::mem::take(&mut rule.selectors);
        let mut kept = Vec::with_capacity(selectors.len());
        for (selector_pos, selector) in selectors.into_iter().enumerate() {
            if root_tag_misplaced(&selector) {
                let applied = sink.record(
                    action,
                    FindingKind::InvalidBodyPosition,
                    rule_pos,
                    Some(selector_pos),
                    format!("selector `{selector}` places `{ROOT_TAG}` after an ancestor and can never match"),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stylesheet::{Combinator, Compound};
    use alloc::vec;

    fn compound<'a>(tag: Option<&'a str>, class: Option<&'a str>) -> Compound<'a> {
        Compound {
            tag,
            classes: class.map(|c| vec![c]).unwrap_or_default(),
            combinator: Combinator::Descendant,
            ..Compound::default()
        }
    }

    #[test]
    fn outermost_root_tag_is_valid() {
        // `body .x`: key .x, ancestor body.
        let selector = Selector {
            compounds: vec![compound(None, Some("x")), compound(Some("body"), None)],
        };
        assert!(!root_tag_misplaced(&selector));
    }

    #[test]
    fn root_tag_under_an_ancestor_is_invalid() {
        // `.y body`: key body, ancestor .y.
        let selector = Selector {
            compounds: vec![compound(Some("body"), None), compound(None, Some("y"))],
        };
        assert!(root_tag_misplaced(&selector));
    }

    #[test]
    fn bare_root_tag_selector_is_valid() {
        let selector = Selector {
            compounds: vec![compound(Some("body"), None)],
        };
        assert!(!root_tag_misplaced(&selector));
    }

    #[test]
    fn tag_comparison_is_case_insensitive() {
        let selector = Selector {
            compounds: vec![compound(Some("BODY"), None), compound(None, Some("y"))],
        };
        assert!(root_tag_misplaced(&selector));
    }
}
