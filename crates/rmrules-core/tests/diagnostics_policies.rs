//! Policy routing, reporting budget, and terminal failure behavior.

mod common;

use common::run;
use rmrules_core::{Action, AnalysisConfig, CoreError, FindingKind};

#[test]
fn warn_reports_without_mutating() {
    let config = AnalysisConfig::default().with_on_override(Action::Warn);
    let (output, outcome) = run(".y{color:red;}.y{color:blue;}", &config);
    assert_eq!(output, ".y{color:red;}.y{color:blue;}");

    let report = outcome.unwrap();
    assert_eq!(report.warn_count, 1);
    assert_eq!(report.remove_count, 0);
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].kind, FindingKind::OverriddenDeclaration);
    assert!(!report.findings[0].applied);
}

#[test]
fn error_fails_the_run_after_the_full_pass() {
    let config = AnalysisConfig::default().with_on_override(Action::Error);
    let (output, outcome) = run(".y{color:red;}.y{color:blue;}", &config);
    assert_eq!(output, ".y{color:red;}.y{color:blue;}");

    let err = outcome.unwrap_err();
    let report = err.report().expect("analysis failure carries the report");
    assert_eq!(report.error_count, 1);
    assert!(report.has_errors());
}

#[test]
fn remove_and_error_policies_compose() {
    // The dead-selector removal is applied even though the override finding
    // fails the run; callers get the mutated stylesheet and the report.
    let config = AnalysisConfig::default()
        .with_assume_never_matches(vec![".x".to_string()])
        .with_on_dead_selector(Action::Remove)
        .with_on_override(Action::Error);
    let (output, outcome) = run(".x{color:red;}.y{color:red;}.y{color:blue;}", &config);
    assert_eq!(output, ".y{color:red;}.y{color:blue;}");

    let err = outcome.unwrap_err();
    let report = err.report().unwrap();
    assert_eq!(report.remove_count, 1);
    assert_eq!(report.error_count, 1);
}

#[test]
fn ignored_categories_leave_no_trace() {
    let config = AnalysisConfig::default()
        .with_assume_never_matches(vec![".x".to_string()])
        .with_on_dead_selector(Action::Ignore)
        .with_on_override(Action::Ignore);
    let (output, outcome) = run(".x{color:red;}.y{color:red;}.y{color:blue;}", &config);
    assert_eq!(output, ".x{color:red;}.y{color:red;}.y{color:blue;}");
    assert_eq!(outcome.unwrap().total(), 0);
}

#[test]
fn budget_suppresses_rendering_but_not_counting() {
    let config = AnalysisConfig::default()
        .with_assume_never_matches(vec![".x".to_string()])
        .with_on_dead_selector(Action::Warn)
        .with_max_reported(1);
    let (_, outcome) = run(".x{a:1;}.x{b:2;}.x{c:3;}", &config);

    let report = outcome.unwrap();
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.warn_count, 3);
    assert_eq!(report.suppressed, 2);
}

#[test]
fn overlapping_assumption_sets_are_rejected_up_front() {
    let config = AnalysisConfig::default()
        .with_assume_never_matches(vec![".x".to_string()])
        .with_assume_always_matches(vec![".x".to_string()]);
    let (output, outcome) = run(".x{color:red;}", &config);
    assert_eq!(output, ".x{color:red;}");
    assert!(matches!(outcome.unwrap_err(), CoreError::Config(_)));
}

#[test]
fn dead_selector_finding_names_the_selector() {
    let config = AnalysisConfig::default()
        .with_assume_never_matches(vec![".x".to_string()])
        .with_on_dead_selector(Action::Warn);
    let (_, outcome) = run(".x .y{color:red;}", &config);

    let report = outcome.unwrap();
    assert_eq!(report.findings.len(), 1);
    let finding = &report.findings[0];
    assert_eq!(finding.kind, FindingKind::DeadSelector);
    assert_eq!(finding.rule_pos, 0);
    assert!(finding.message.contains(".x .y"));
}

#[test]
fn remove_policy_marks_findings_applied() {
    let config = AnalysisConfig::default().with_on_override(Action::Remove);
    let (_, outcome) = run(".y{color:red;}.y{color:blue;}", &config);
    let report = outcome.unwrap();
    assert_eq!(report.findings.len(), 1);
    assert!(report.findings[0].applied);
    assert_eq!(report.findings[0].rule_pos, 0);
}
