//! Run command implementation
//!
//! Selects probes from the fixture list, runs them, and formats the report.

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::info;

use crate::fixtures::standard_probes;
use crate::probe::ProbeSpec;
use crate::report::{self, RunReport};
use crate::runner;

/// Configuration for the run command
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Only run probes with these names (empty = all)
    pub only: Vec<String>,
    /// Emit a JSON report instead of text
    pub json: bool,
    /// Exit non-zero when any probe is not matched
    pub strict: bool,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectError {
    #[error("Unknown probe '{0}'. Run 'probe-harness list' to see available probes.")]
    UnknownProbe(String),
}

/// Keep only the named probes, in fixture order
pub fn select(specs: Vec<ProbeSpec>, only: &[String]) -> Result<Vec<ProbeSpec>, SelectError> {
    if only.is_empty() {
        return Ok(specs);
    }

    if let Some(unknown) = only
        .iter()
        .find(|name| !specs.iter().any(|spec| spec.name() == name.as_str()))
    {
        return Err(SelectError::UnknownProbe(unknown.clone()));
    }

    Ok(specs
        .into_iter()
        .filter(|spec| only.iter().any(|name| name == spec.name()))
        .collect())
}

/// Run the given probes and collect a report
pub fn execute(specs: &[ProbeSpec]) -> RunReport {
    let report = RunReport::new(runner::run(specs));
    info!(
        matched = report.summary.matched,
        unmatched = report.summary.unmatched,
        did_not_fail = report.summary.did_not_fail,
        "run complete"
    );
    report
}

/// Run the standard probes with the given config
pub fn run(config: &RunConfig) -> Result<RunReport> {
    let specs = select(standard_probes(), &config.only)?;
    Ok(execute(&specs))
}

/// Format a report the way the config asks for
pub fn format_report(report: &RunReport, config: &RunConfig) -> Result<String> {
    if config.json {
        report::render_json(report).context("Failed to serialize run report")
    } else {
        Ok(report::render(&report.outcomes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::{FailureKind, ProbeError};
    use crate::probe::OutcomeStatus;

    fn specs() -> Vec<ProbeSpec> {
        vec![
            ProbeSpec::new("A", FailureKind::InvalidArgument, || {
                Err(ProbeError::new(FailureKind::InvalidArgument, "bad"))
            }),
            ProbeSpec::new("B", FailureKind::InvalidArgument, || Ok(())),
            ProbeSpec::new("C", FailureKind::MalformedInput, || {
                Err(ProbeError::new(FailureKind::MalformedInput, "bad"))
            }),
        ]
    }

    #[test]
    fn test_select_all_when_empty() {
        let selected = select(specs(), &[]).unwrap();
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn test_select_keeps_fixture_order() {
        let only = vec!["C".to_string(), "A".to_string()];
        let selected = select(specs(), &only).unwrap();
        let names: Vec<&str> = selected.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_select_unknown_probe() {
        let only = vec!["A".to_string(), "Nope".to_string()];
        let err = select(specs(), &only).unwrap_err();
        assert_eq!(err, SelectError::UnknownProbe("Nope".to_string()));
        assert!(err.to_string().contains("Nope"));
    }

    #[test]
    fn test_execute_summarizes() {
        let report = execute(&specs());
        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.summary.matched, 2);
        assert_eq!(report.summary.did_not_fail, 1);
        assert_eq!(report.outcomes[1].status, OutcomeStatus::DidNotFail);
    }

    #[test]
    fn test_run_selected_standard_probe() {
        let config = RunConfig {
            only: vec!["DivideByZero".to_string()],
            ..RunConfig::default()
        };
        let report = run(&config).unwrap();
        assert_eq!(report.outcomes.len(), 1);
        assert!(report.outcomes[0].is_matched());
    }

    #[test]
    fn test_format_report_text_and_json() {
        let report = execute(&specs());

        let text = format_report(&report, &RunConfig::default()).unwrap();
        assert!(text.starts_with("A caught: bad"));
        assert!(text.ends_with("(3 probes)\n"));

        let config = RunConfig {
            json: true,
            ..RunConfig::default()
        };
        let json = format_report(&report, &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["outcomes"].as_array().unwrap().len(), 3);
    }
}
