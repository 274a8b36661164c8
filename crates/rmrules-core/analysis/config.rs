//! Analysis configuration
//!
//! Assumption sets and per-category policies for one run. Configuration is
//! immutable for the duration of a pass; each invocation receives it fresh
//! together with a fresh diagnostics accumulator.

use crate::utils::CoreError;
use crate::Result;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Policy applied to one finding category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Action {
    /// Do not run the check at all
    Ignore,
    /// Count and report the finding; leave the stylesheet untouched
    #[default]
    Warn,
    /// Count and report the finding, withhold the mutation, and fail the run
    /// after the full pass completes
    Error,
    /// Apply the mutation silently (still counted and reported under budget)
    Remove,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignore => write!(f, "ignore"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// Configuration for one analysis run
///
/// Assumption selectors use the conventional prefixes: `.name` for classes,
/// `#name` for ids, bare names for tags. `assume_never_matches` feeds the
/// dead-selector filter; `assume_always_matches` relaxes the override proof
/// wherever an attribute is unspecified on a key element.
///
/// # Example
///
/// ```rust
/// use rmrules_core::{Action, AnalysisConfig};
///
/// let config = AnalysisConfig::default()
///     .with_assume_never_matches(vec![".legacy".into()])
///     .with_on_dead_selector(Action::Remove)
///     .with_on_override(Action::Warn)
///     .with_max_reported(10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisConfig {
    /// Simple selectors that provably match no element in this document
    pub assume_never_matches: Vec<String>,
    /// Simple selectors that provably match on the key element of every
    /// selector chain wherever that attribute is unspecified
    pub assume_always_matches: Vec<String>,
    /// Policy for dead-selector findings
    pub on_dead_selector: Action,
    /// Policy for override findings (whole selectors and single properties)
    pub on_override: Action,
    /// Policy for misplaced root-tag findings
    pub on_invalid_body_position: Action,
    /// Cap on rendered findings per run; further findings are still counted
    pub max_reported: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            assume_never_matches: Vec::new(),
            assume_always_matches: Vec::new(),
            on_dead_selector: Action::default(),
            on_override: Action::default(),
            on_invalid_body_position: Action::default(),
            max_reported: 20,
        }
    }
}

impl AnalysisConfig {
    /// Set the never-matches assumption set
    #[must_use]
    pub fn with_assume_never_matches(mut self, selectors: Vec<String>) -> Self {
        self.assume_never_matches = selectors;
        self
    }

    /// Set the always-matches assumption set
    #[must_use]
    pub fn with_assume_always_matches(mut self, selectors: Vec<String>) -> Self {
        self.assume_always_matches = selectors;
        self
    }

    /// Set the dead-selector policy
    #[must_use]
    pub const fn with_on_dead_selector(mut self, action: Action) -> Self {
        self.on_dead_selector = action;
        self
    }

    /// Set the override policy
    #[must_use]
    pub const fn with_on_override(mut self, action: Action) -> Self {
        self.on_override = action;
        self
    }

    /// Set the misplaced-root-tag policy
    #[must_use]
    pub const fn with_on_invalid_body_position(mut self, action: Action) -> Self {
        self.on_invalid_body_position = action;
        self
    }

    /// Set the reporting budget
    #[must_use]
    pub const fn with_max_reported(mut self, max_reported: usize) -> Self {
        self.max_reported = max_reported;
        self
    }

    /// Reject contradictory assumption sets
    ///
    /// A selector listed as both never-matching and always-matching has no
    /// defined meaning; the run is refused instead of silently resolving the
    /// conflict one way.
    pub fn validate(&self) -> Result<()> {
        for selector in &self.assume_never_matches {
            if self.assume_always_matches.contains(selector) {
                return Err(CoreError::config(format!(
                    "selector `{selector}` appears in both assume_never_matches and assume_always_matches"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn default_policies_warn_without_mutating() {
        let config = AnalysisConfig::default();
        assert_eq!(config.on_dead_selector, Action::Warn);
        assert_eq!(config.on_override, Action::Warn);
        assert_eq!(config.on_invalid_body_position, Action::Warn);
        assert_eq!(config.max_reported, 20);
    }

    #[test]
    fn overlapping_assumption_sets_are_rejected() {
        let config = AnalysisConfig::default()
            .with_assume_never_matches(vec![".x".to_string()])
            .with_assume_always_matches(vec![".m".to_string(), ".x".to_string()]);
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("`.x`"));
    }

    #[test]
    fn disjoint_assumption_sets_validate() {
        let config = AnalysisConfig::default()
            .with_assume_never_matches(vec![".x".to_string()])
            .with_assume_always_matches(vec![".m".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn action_display_matches_option_values() {
        assert_eq!(Action::Ignore.to_string(), "ignore");
        assert_eq!(Action::Warn.to_string(), "warn");
        assert_eq!(Action::Error.to_string(), "error");
        assert_eq!(Action::Remove.to_string(), "remove");
    }
}
