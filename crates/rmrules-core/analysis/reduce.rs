//! Declaration reducer and rule pruner
//!
//! Consumes the proven override edges and removes the dead declarations and
//! selectors they justify. Removals are planned against pre-mutation
//! positions and applied as one batch rebuild of the affected vectors, so a
//! removal never shifts the positions a later edge refers to.
//!
//! Reduction is conservative around comma groups: a whole selector drops out
//! of its group only when the winner re-specifies every declaration of the
//! losing rule, and a property is removed from a group-backed rule only when
//! every selector of the group is independently proven overridden for it.

use crate::analysis::diagnostics::{DiagnosticSink, FindingKind};
use crate::analysis::index::Occurrence;
use crate::analysis::overrides::OverrideEdge;
use crate::analysis::Action;
use crate::stylesheet::{Declaration, Node, Rule, Stylesheet};
use crate::utils::hashers::{create_hash_set, Set};
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// The winner's declaration that masks `loser_decl`, if the proof holds
///
/// Within the winner's own block a later declaration of the same property
/// wins, so the last copy is the authoritative one. An important loser
/// declaration is never masked by a non-important winner; an
/// importance-only edge additionally demands an important winner copy.
fn winning_declaration<'r, 'a>(
    winner: &'r Rule<'a>,
    loser_decl: &Declaration<'a>,
    importance_only: bool,
) -> Option<&'r Declaration<'a>> {
    let candidate = winner
        .declarations
        .iter()
        .rfind(|decl| decl.property == loser_decl.property)?;
    if loser_decl.is_important() && !candidate.is_important() {
        return None;
    }
    if importance_only && !candidate.is_important() {
        return None;
    }
    Some(candidate)
}

fn covers_all_declarations(winner: &Rule<'_>, loser: &Rule<'_>, importance_only: bool) -> bool {
    loser
        .declarations
        .iter()
        .all(|decl| winning_declaration(winner, decl, importance_only).is_some())
}

fn group_text(rule: &Rule<'_>) -> String {
    let mut text = String::new();
    for (i, selector) in rule.selectors.iter().enumerate() {
        if i > 0 {
            text.push(',');
        }
        text.push_str(&selector.to_string());
    }
    text
}

/// Apply the override edges to the stylesheet under the configured policy
pub(crate) fn reduce_overridden(
    stylesheet: &mut Stylesheet<'_>,
    edges: &[OverrideEdge],
    occurrences: &[Occurrence],
    action: Action,
    sink: &mut DiagnosticSink,
) {
    let mut decl_removals: Set<(usize, usize)> = create_hash_set();
    let mut selector_removals: Set<(usize, usize)> = create_hash_set();

    {
        let st = &*stylesheet;
        // (loser rule, property) -> group selector positions proven
        // overridden for that property.
        let mut coverage: BTreeMap<(usize, &str), BTreeSet<usize>> = BTreeMap::new();
        // Track importance-only coverage separately: an importance-only
        // proof must not combine with a plain one to justify a removal the
        // plain proof alone would not.
        let mut importance_cover: BTreeMap<(usize, &str), BTreeSet<usize>> = BTreeMap::new();

        for edge in edges {
            let w_occ = &occurrences[edge.winner];
            let l_occ = &occurrences[edge.loser];
            let (Some(w_rule), Some(l_rule)) = (
                st.nodes[w_occ.rule_pos].as_rule(),
                st.nodes[l_occ.rule_pos].as_rule(),
            ) else {
                continue;
            };
            if selector_removals.contains(&(l_occ.rule_pos, l_occ.selector_pos)) {
                continue;
            }
            let w_sel = &w_rule.selectors[w_occ.selector_pos];
            let l_sel = &l_rule.selectors[l_occ.selector_pos];

            if l_rule.selectors.len() == 1 {
                // Sole selector: every re-specified property on the loser is
                // provably dead.
                for (decl_pos, decl) in l_rule.declarations.iter().enumerate() {
                    if decl_removals.contains(&(l_occ.rule_pos, decl_pos)) {
                        continue;
                    }
                    if winning_declaration(w_rule, decl, edge.importance_only).is_some() {
                        let applied = sink.record(
                            action,
                            FindingKind::OverriddenDeclaration,
                            l_occ.rule_pos,
                            Some(l_occ.selector_pos),
                            format!(
                                "selector `{w_sel}` always overrides css property `{}` of `{l_sel}`",
                                decl.property
                            ),
                        );
                        if applied {
                            decl_removals.insert((l_occ.rule_pos, decl_pos));
                        }
                    }
                }
            } else if covers_all_declarations(w_rule, l_rule, edge.importance_only) {
                // Comma group, full coverage: the whole selector is redundant.
                let applied = sink.record(
                    action,
                    FindingKind::OverriddenSelector,
                    l_occ.rule_pos,
                    Some(l_occ.selector_pos),
                    format!("selector `{w_sel}` always overrides all css properties of `{l_sel}`"),
                );
                if applied {
                    selector_removals.insert((l_occ.rule_pos, l_occ.selector_pos));
                }
                for decl in &l_rule.declarations {
                    let cover = if edge.importance_only {
                        &mut importance_cover
                    } else {
                        &mut coverage
                    };
                    cover
                        .entry((l_occ.rule_pos, decl.property))
                        .or_default()
                        .insert(l_occ.selector_pos);
                }
            } else {
                // Partial coverage of a comma group: dropping the selector
                // would lose the properties the winner does not re-specify,
                // so only book the per-property proof.
                for decl in &l_rule.declarations {
                    if winning_declaration(w_rule, decl, edge.importance_only).is_some() {
                        let cover = if edge.importance_only {
                            &mut importance_cover
                        } else {
                            &mut coverage
                        };
                        cover
                            .entry((l_occ.rule_pos, decl.property))
                            .or_default()
                            .insert(l_occ.selector_pos);
                    }
                }
            }
        }

        // Merge importance-only proofs in: they stand on their own per
        // selector position, so a union is sound for the all-positions test.
        for ((rule_pos, property), positions) in importance_cover {
            coverage
                .entry((rule_pos, property))
                .or_default()
                .extend(positions);
        }

        // A property leaves a comma-group rule only when no surviving
        // selector of the group still needs it.
        for ((rule_pos, property), covered) in &coverage {
            let Some(rule) = st.nodes[*rule_pos].as_rule() else {
                continue;
            };
            if rule.selectors.len() < 2 || covered.len() != rule.selectors.len() {
                continue;
            }
            let pending: Vec<usize> = rule
                .declarations
                .iter()
                .enumerate()
                .filter(|(decl_pos, decl)| {
                    decl.property == *property && !decl_removals.contains(&(*rule_pos, *decl_pos))
                })
                .map(|(decl_pos, _)| decl_pos)
                .collect();
            if pending.is_empty() {
                continue;
            }
            let applied = sink.record(
                action,
                FindingKind::OverriddenDeclaration,
                *rule_pos,
                None,
                format!(
                    "css property `{property}` of `{}` is always overridden for every selector in the group",
                    group_text(rule)
                ),
            );
            if applied {
                for decl_pos in pending {
                    decl_removals.insert((*rule_pos, decl_pos));
                }
            }
        }
    }

    if decl_removals.is_empty() && selector_removals.is_empty() {
        return;
    }

    for (rule_pos, node) in stylesheet.nodes.iter_mut().enumerate() {
        let Some(rule) = node.as_rule_mut() else {
            continue;
        };

        if selector_removals
            .iter()
            .any(|(pos, _)| *pos == rule_pos)
        {
            let selectors = core::mem::take(&mut rule.selectors);
            rule.selectors = selectors
                .into_iter()
                .enumerate()
                .filter(|(i, _)| !selector_removals.contains(&(rule_pos, *i)))
                .map(|(_, selector)| selector)
                .collect();
        }

        if decl_removals.iter().any(|(pos, _)| *pos == rule_pos) {
            let declarations = core::mem::take(&mut rule.declarations);
            rule.declarations = declarations
                .into_iter()
                .enumerate()
                .filter(|(i, _)| !decl_removals.contains(&(rule_pos, *i)))
                .map(|(_, declaration)| declaration)
                .collect();
        }
    }
}

/// Drop rules that lost their last selector or declaration
///
/// Runs after every other pass; surviving node order is untouched. Rules
/// that arrived empty from the parser are dropped the same way.
pub(crate) fn prune_empty_rules(stylesheet: &mut Stylesheet<'_>) {
    stylesheet.nodes.retain(|node| match node {
        Node::Rule(rule) => !rule.selectors.is_empty() && !rule.declarations.is_empty(),
        Node::AtRule(_) | Node::Comment(_) => true,
    });
}
