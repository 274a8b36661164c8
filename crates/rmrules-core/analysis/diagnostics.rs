//! Diagnostics accumulator
//!
//! Every finding from every pass is routed through [`DiagnosticSink`] before
//! the corresponding mutation is applied. The sink owns the per-run counters
//! and the `max_reported` rendering budget; formatting and source-position
//! resolution are the host's responsibility, so findings carry positional
//! node references and a pre-built human message only.

use crate::analysis::Action;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Kind of redundancy or invalidity detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingKind {
    /// Selector can never match under `assume_never_matches`
    DeadSelector,
    /// Root-tag compound placed anywhere but the outermost chain position
    InvalidBodyPosition,
    /// One rule's selector is wholly redundant
    OverriddenSelector,
    /// One property on one rule is wholly redundant
    OverriddenDeclaration,
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeadSelector => write!(f, "dead-selector"),
            Self::InvalidBodyPosition => write!(f, "invalid-body-position"),
            Self::OverriddenSelector => write!(f, "overridden-selector"),
            Self::OverriddenDeclaration => write!(f, "overridden-declaration"),
        }
    }
}

/// A single finding, rendered into the report while budget remains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// What was detected
    pub kind: FindingKind,
    /// Policy that was in force for this category
    pub action: Action,
    /// Human-readable message with selector/property context
    pub message: String,
    /// Node index of the affected rule in the input node sequence
    pub rule_pos: usize,
    /// Selector position within the rule's group at the time the pass ran;
    /// `None` for findings that concern the whole group
    pub selector_pos: Option<usize>,
    /// Whether the mutation was applied (`remove` policy only)
    pub applied: bool,
}

/// Accumulated outcome of one run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    /// Findings rendered within the `max_reported` budget
    pub findings: Vec<Finding>,
    /// Findings classified as `error`
    pub error_count: usize,
    /// Findings classified as `warn`
    pub warn_count: usize,
    /// Findings applied under the `remove` policy
    pub remove_count: usize,
    /// Findings counted but not rendered because the budget ran out
    pub suppressed: usize,
}

impl Report {
    /// Whether the run must terminate with a failure
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Total number of findings across all policies
    #[must_use]
    pub const fn total(&self) -> usize {
        self.error_count + self.warn_count + self.remove_count
    }
}

/// Per-run diagnostics state machine
///
/// `record` returns whether the caller may apply the mutation that the
/// finding describes: true only under the `remove` policy.
#[derive(Debug)]
pub(crate) struct DiagnosticSink {
    report: Report,
    budget: usize,
}

impl DiagnosticSink {
    pub(crate) const fn new(max_reported: usize) -> Self {
        Self {
            report: Report {
                findings: Vec::new(),
                error_count: 0,
                warn_count: 0,
                remove_count: 0,
                suppressed: 0,
            },
            budget: max_reported,
        }
    }

    /// Route one finding through the policy for its category
    pub(crate) fn record(
        &mut self,
        action: Action,
        kind: FindingKind,
        rule_pos: usize,
        selector_pos: Option<usize>,
        message: String,
    ) -> bool {
        let applied = match action {
            // Ignored categories never reach the sink; tolerate the call
            // anyway and change no state.
            Action::Ignore => return false,
            Action::Warn => {
                self.report.warn_count += 1;
                false
            }
            Action::Error => {
                self.report.error_count += 1;
                false
            }
            Action::Remove => {
                self.report.remove_count += 1;
                true
            }
        };

        if self.budget > 0 {
            self.budget -= 1;
            self.report.findings.push(Finding {
                kind,
                action,
                message,
                rule_pos,
                selector_pos,
                applied,
            });
        } else {
            self.report.suppressed += 1;
        }

        applied
    }

    pub(crate) fn into_report(self) -> Report {
        self.report
    }
}
