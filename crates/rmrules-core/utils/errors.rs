//! Unified error type for engine operations
//!
//! Structured errors via `thiserror` (no `anyhow` bloat), derive gated on
//! `std` with manual `Display`/`Error` impls for `nostd` builds. Findings are
//! not errors: the four finding kinds flow through the diagnostics
//! accumulator, and the only propagated failure is the terminal
//! "error-classified findings occurred" raised once after the full pass.

use crate::analysis::Report;
use alloc::format;
use alloc::string::String;
use core::fmt;

/// Main error type for engine operations
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum CoreError {
    /// Configuration rejected before the pass ran
    #[cfg_attr(feature = "std", error("configuration error: {0}"))]
    Config(String),

    /// One or more findings were classified as `Action::Error`
    ///
    /// Raised once, after every category has been evaluated. Carries the
    /// full report; `remove`-policy mutations made during the same run were
    /// already applied before this is raised, so the host must treat the run
    /// as not-applied for correctness-guarantee purposes.
    #[cfg_attr(
        feature = "std",
        error("analysis reported {} finding(s) classified as error", .0.error_count)
    )]
    AnalysisFailed(Report),
}

impl CoreError {
    /// Create a configuration error from a message
    pub fn config<T: fmt::Display>(message: T) -> Self {
        Self::Config(format!("{message}"))
    }

    /// The report attached to a terminal analysis failure, if any
    #[must_use]
    pub const fn report(&self) -> Option<&Report> {
        match self {
            Self::AnalysisFailed(report) => Some(report),
            Self::Config(_) => None,
        }
    }
}

/// no_std compatible Display implementation
#[cfg(not(feature = "std"))]
impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(message) => write!(f, "configuration error: {message}"),
            Self::AnalysisFailed(report) => write!(
                f,
                "analysis reported {} finding(s) classified as error",
                report.error_count
            ),
        }
    }
}

/// no_std compatible Error implementation
#[cfg(not(feature = "std"))]
impl core::error::Error for CoreError {}
