//! Override analyzer
//!
//! The algorithmic heart: a sound, conservative structural proof that one
//! selector always overrides another under the assumption sets and cascade
//! order. `always_overrides(a, b, ...)` holds iff every element matched by
//! selector `b` is also matched by `a`'s structural constraints, evaluated
//! compound-by-compound outward along both chains. Anything the proof cannot
//! establish is treated as not overriding.
//!
//! Two proof directions feed the edge set: the relaxed later-wins direction
//! (cascade position breaks the tie) and the strict earlier-subsumes
//! direction (textual specificity wins regardless of position). A third,
//! importance-gated suffix proof recovers the case where a later
//! `!important` declaration masks an earlier plain one on a more deeply
//! qualified chain.

use crate::analysis::index::{Occurrence, SelectorIndex};
use crate::stylesheet::{set_equal, Combinator, Compound, Selector, Stylesheet};
use crate::utils::hashers::{create_hash_set, Set};
use alloc::vec::Vec;

/// Parsed always-matches assumption set
///
/// Splits the configured simple selectors by kind once, so the per-compound
/// predicates are plain set lookups. Raw tokens are kept for the candidate
/// signature subtraction.
#[derive(Debug, Default)]
pub struct AlwaysSet<'c> {
    classes: Set<&'c str>,
    ids: Set<&'c str>,
    tags: Set<&'c str>,
    tokens: Set<&'c str>,
}

impl<'c> AlwaysSet<'c> {
    /// Build from simple selector strings (`.class`, `#id`, bare tag)
    pub fn from_selectors<I>(selectors: I) -> Self
    where
        I: IntoIterator<Item = &'c str>,
    {
        let mut classes = create_hash_set();
        let mut ids = create_hash_set();
        let mut tags = create_hash_set();
        let mut tokens = create_hash_set();
        for selector in selectors {
            if let Some(class) = selector.strip_prefix('.') {
                classes.insert(class);
            } else if let Some(id) = selector.strip_prefix('#') {
                ids.insert(id);
            } else {
                tags.insert(selector);
            }
            tokens.insert(selector);
        }
        Self {
            classes,
            ids,
            tags,
            tokens,
        }
    }

    /// An empty assumption set
    #[must_use]
    pub fn empty() -> Self {
        Self::from_selectors(core::iter::empty())
    }

    pub(crate) fn contains_token(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    fn has_id(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Combinator comparison mode for one proof
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinatorMode {
    /// Allow descendant to subsume child, and general-sibling to subsume
    /// adjacent-sibling
    Relaxed,
    /// Force exact combinator equality; used when testing whether a chain is
    /// unconditionally true on its own, to avoid unsound relaxation chaining
    Strict,
}

/// An always-present id cannot be contradicted by an id-less selector.
fn id_overrides(a: Option<&str>, b: Option<&str>, always: &AlwaysSet<'_>) -> bool {
    match (a, b) {
        (a, b) if a == b => true,
        (Some(id), None) => always.has_id(id),
        _ => false,
    }
}

fn tag_overrides(a: Option<&str>, b: Option<&str>, always: &AlwaysSet<'_>) -> bool {
    match (a, b) {
        (a, b) if a == b => true,
        (Some(tag), None) => always.has_tag(tag),
        _ => false,
    }
}

/// Every class `a` requires must be guaranteed wherever `b` matches (present
/// on `b` or always-set), and `b` must require nothing `a` does not: an
/// unguaranteed extra on either side leaves elements where one applies
/// without the other.
fn classes_override(a: &[&str], b: &[&str], always: &AlwaysSet<'_>) -> bool {
    a.iter()
        .all(|class| b.contains(class) || always.has_class(class))
        && b.iter().all(|class| a.contains(class))
}

fn combinator_overrides(a: Combinator, b: Combinator, mode: CombinatorMode) -> bool {
    if a == b {
        return true;
    }
    if mode == CombinatorMode::Strict {
        return false;
    }
    matches!(
        (a, b),
        (Combinator::Descendant, Combinator::Child)
            | (Combinator::SubsequentSibling, Combinator::NextSibling)
    )
}

fn compound_overrides(
    a: &Compound<'_>,
    b: &Compound<'_>,
    always: &AlwaysSet<'_>,
    mode: CombinatorMode,
) -> bool {
    id_overrides(a.id, b.id, always)
        && tag_overrides(a.tag, b.tag, always)
        && combinator_overrides(a.combinator, b.combinator, mode)
        // Attribute and pseudo matching is not assumption-driven: any
        // difference breaks the proof.
        && set_equal(&a.attributes, &b.attributes)
        && set_equal(&a.pseudos, &b.pseudos)
        && classes_override(&a.classes, &b.classes, always)
}

fn chain_overrides(
    a: &[Compound<'_>],
    b: &[Compound<'_>],
    always: &AlwaysSet<'_>,
    mode: CombinatorMode,
) -> bool {
    let Some((a_head, a_rest)) = a.split_first() else {
        // A exhausted: conclusive only if B has no further ancestors either.
        return b.is_empty();
    };
    match b.split_first() {
        Some((b_head, b_rest)) if compound_overrides(a_head, b_head, always, mode) => {
            chain_overrides(a_rest, b_rest, always, mode)
        }
        // B exhausted, or its head does not line up: A's extra constraint
        // must be unconditionally satisfiable on its own before A's
        // remaining ancestors are matched against what is left of B.
        _ => {
            compound_overrides(a_head, &Compound::empty(), always, CombinatorMode::Strict)
                && chain_overrides(a_rest, b, always, mode)
        }
    }
}

/// Prove that selector `a` always overrides selector `b`
///
/// True iff `a`'s structural constraints are satisfied by every element `b`
/// matches, under the always-matches assumptions. Evaluated from the key
/// compounds outward; identical chains trivially satisfy it.
///
/// # Example
///
/// ```rust
/// use rmrules_core::{always_overrides, AlwaysSet, CombinatorMode};
/// use rmrules_core::stylesheet::{Combinator, Compound, Selector};
///
/// // `.y .z` subsumes `.y > .z`: descendant is the weaker operator.
/// let child = Selector {
///     compounds: vec![
///         Compound { classes: vec!["z"], combinator: Combinator::Child, ..Compound::default() },
///         Compound { classes: vec!["y"], ..Compound::default() },
///     ],
/// };
/// let descendant = Selector {
///     compounds: vec![
///         Compound { classes: vec!["z"], ..Compound::default() },
///         Compound { classes: vec!["y"], ..Compound::default() },
///     ],
/// };
///
/// let always = AlwaysSet::empty();
/// assert!(always_overrides(&descendant, &child, &always, CombinatorMode::Relaxed));
/// assert!(!always_overrides(&descendant, &child, &always, CombinatorMode::Strict));
/// ```
#[must_use]
pub fn always_overrides(
    a: &Selector<'_>,
    b: &Selector<'_>,
    always: &AlwaysSet<'_>,
    mode: CombinatorMode,
) -> bool {
    chain_overrides(&a.compounds, &b.compounds, always, mode)
}

/// Proven override relationship between two selector occurrences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OverrideEdge {
    /// Occurrence index of the winning selector
    pub winner: usize,
    /// Occurrence index of the losing selector
    pub loser: usize,
    /// Edge proven only through the importance suffix rule; it justifies a
    /// removal only where the winner's declaration is `!important`
    pub importance_only: bool,
}

fn selector_at<'s, 'a>(stylesheet: &'s Stylesheet<'a>, occ: &Occurrence) -> &'s Selector<'a> {
    let rule = stylesheet.nodes[occ.rule_pos]
        .as_rule()
        .unwrap_or_else(|| unreachable!("occurrences index only rule nodes"));
    &rule.selectors[occ.selector_pos]
}

/// Compare candidate pairs within each signature bucket
///
/// For occurrences `a` earlier and `b` later at distinct rule positions:
/// the relaxed `b`-over-`a` proof records the natural later-wins edge (this
/// also covers identical selectors); otherwise the strict `a`-over-`b` proof
/// records the earlier-is-more-specific edge. Both directions are tested
/// because textual specificity, not cascade order alone, can make a selector
/// win even when declared first.
pub(crate) fn calculate_override_edges(
    stylesheet: &Stylesheet<'_>,
    index: &SelectorIndex,
    always: &AlwaysSet<'_>,
) -> Vec<OverrideEdge> {
    let mut edges = Vec::new();

    for bucket in index.buckets.values() {
        for (i, &a_idx) in bucket.iter().enumerate() {
            for &b_idx in &bucket[i + 1..] {
                let a_occ = &index.occurrences[a_idx];
                let b_occ = &index.occurrences[b_idx];
                if a_occ.rule_pos >= b_occ.rule_pos {
                    continue;
                }
                let a_sel = selector_at(stylesheet, a_occ);
                let b_sel = selector_at(stylesheet, b_occ);

                if always_overrides(b_sel, a_sel, always, CombinatorMode::Relaxed) {
                    // Also covers the case where the two chains are identical.
                    edges.push(OverrideEdge {
                        winner: b_idx,
                        loser: a_idx,
                        importance_only: false,
                    });
                } else if always_overrides(a_sel, b_sel, always, CombinatorMode::Strict) {
                    edges.push(OverrideEdge {
                        winner: a_idx,
                        loser: b_idx,
                        importance_only: false,
                    });
                }
            }
        }
    }

    edges
}

fn rule_has_important(stylesheet: &Stylesheet<'_>, rule_pos: usize) -> bool {
    stylesheet.nodes[rule_pos]
        .as_rule()
        .is_some_and(|rule| rule.declarations.iter().any(|decl| decl.is_important()))
}

/// Importance suffix pass
///
/// An important declaration on a less-specific selector still overrides a
/// non-important declaration on a more deeply qualified one. For a later rule
/// carrying `!important` declarations, prove its selector against the
/// earlier chain with one or more of the earlier chain's innermost compounds
/// dropped. Pairs sharing a signature were already compared exactly by the
/// bucket pass and are skipped here.
pub(crate) fn calculate_importance_edges(
    stylesheet: &Stylesheet<'_>,
    occurrences: &[Occurrence],
    always: &AlwaysSet<'_>,
) -> Vec<OverrideEdge> {
    let mut edges = Vec::new();

    for (b_idx, b_occ) in occurrences.iter().enumerate() {
        if !rule_has_important(stylesheet, b_occ.rule_pos) {
            continue;
        }
        let b_sel = selector_at(stylesheet, b_occ);

        for (a_idx, a_occ) in occurrences.iter().enumerate() {
            if a_occ.rule_pos >= b_occ.rule_pos || a_occ.signature == b_occ.signature {
                continue;
            }
            let a_sel = selector_at(stylesheet, a_occ);

            let suffix_proven = (1..a_sel.compounds.len()).any(|dropped| {
                chain_overrides(
                    &b_sel.compounds,
                    &a_sel.compounds[dropped..],
                    always,
                    CombinatorMode::Relaxed,
                )
            });
            if suffix_proven {
                edges.push(OverrideEdge {
                    winner: b_idx,
                    loser: a_idx,
                    importance_only: true,
                });
            }
        }
    }

    edges
}
