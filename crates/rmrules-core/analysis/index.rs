//! Candidate indexer
//!
//! Computes a cheap structural signature per selector occurrence and buckets
//! occurrences by it, so the override analyzer compares only selectors that
//! could possibly be in an overriding relationship. The signature is the full
//! chain's class/tag/id tokens, deduplicated, minus tokens in the
//! always-matches set, sorted and serialized. Equal signatures are necessary
//! but not sufficient: a full structural comparison still runs within each
//! bucket.

use crate::analysis::overrides::AlwaysSet;
use crate::stylesheet::{Selector, Stylesheet};
use crate::utils::hashers::{create_hash_map, Map};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// One selector occurrence in the stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Occurrence {
    /// Node index of the owning rule
    pub rule_pos: usize,
    /// Position within the rule's selector group
    pub selector_pos: usize,
    /// Chain token signature
    pub signature: String,
}

/// Signature buckets over every selector occurrence
#[derive(Debug)]
pub(crate) struct SelectorIndex {
    /// All occurrences in cascade order
    pub occurrences: Vec<Occurrence>,
    /// Signature to occurrence indices
    pub buckets: Map<String, Vec<usize>>,
}

/// Serialize the filtered token set of one chain
pub(crate) fn signature(selector: &Selector<'_>, always: &AlwaysSet<'_>) -> String {
    let mut tokens: Vec<String> = Vec::new();
    for compound in &selector.compounds {
        for class in &compound.classes {
            tokens.push(format!(".{class}"));
        }
        if let Some(tag) = compound.tag {
            tokens.push(String::from(tag));
        }
        if let Some(id) = compound.id {
            tokens.push(format!("#{id}"));
        }
    }
    tokens.sort_unstable();
    tokens.dedup();
    tokens.retain(|token| !always.contains_token(token));
    tokens.join(",")
}

/// Index every remaining selector occurrence by signature
pub(crate) fn build_index(stylesheet: &Stylesheet<'_>, always: &AlwaysSet<'_>) -> SelectorIndex {
    let mut occurrences = Vec::new();
    let mut buckets: Map<String, Vec<usize>> = create_hash_map();

    for (rule_pos, node) in stylesheet.nodes.iter().enumerate() {
        let Some(rule) = node.as_rule() else {
            continue;
        };
        for (selector_pos, selector) in rule.selectors.iter().enumerate() {
            let signature = signature(selector, always);
            buckets
                .entry(signature.clone())
                .or_default()
                .push(occurrences.len());
            occurrences.push(Occurrence {
                rule_pos,
                selector_pos,
                signature,
            });
        }
    }

    SelectorIndex {
        occurrences,
        buckets,
    }
}
