//! Outcome rendering
//!
//! Text output is one line per outcome followed by a summary line. The JSON
//! form wraps the same outcomes in a [`RunReport`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::probe::{Outcome, OutcomeStatus};

/// Outcome counts for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub matched: usize,
    pub unmatched: usize,
    pub did_not_fail: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.matched + self.unmatched + self.did_not_fail
    }

    /// True when every probe failed exactly as expected
    pub fn all_matched(&self) -> bool {
        self.unmatched == 0 && self.did_not_fail == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Summary: {} matched, {} unmatched, {} did not fail ({} probes)",
            self.matched,
            self.unmatched,
            self.did_not_fail,
            self.total()
        )
    }
}

/// Serializable record of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// When the last probe finished
    pub finished_at: DateTime<Utc>,
    pub summary: Summary,
    pub outcomes: Vec<Outcome>,
}

impl RunReport {
    pub fn new(outcomes: Vec<Outcome>) -> Self {
        Self {
            finished_at: Utc::now(),
            summary: summarize(&outcomes),
            outcomes,
        }
    }
}

/// Count outcomes by status
pub fn summarize(outcomes: &[Outcome]) -> Summary {
    outcomes
        .iter()
        .fold(Summary::default(), |mut summary, outcome| {
            match outcome.status {
                OutcomeStatus::Matched => summary.matched += 1,
                OutcomeStatus::Unmatched => summary.unmatched += 1,
                OutcomeStatus::DidNotFail => summary.did_not_fail += 1,
            }
            summary
        })
}

/// Render a single outcome as one line (no trailing newline)
pub fn render_line(outcome: &Outcome) -> String {
    let message = outcome.observed_message.as_deref().unwrap_or("");
    match outcome.status {
        OutcomeStatus::Matched => format!("{} caught: {}", outcome.probe_name, message),
        OutcomeStatus::Unmatched => {
            let observed = outcome
                .observed_kind
                .as_ref()
                .map(|kind| kind.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            format!(
                "{} mismatch: expected {}, caught {}: {}",
                outcome.probe_name, outcome.expected_kind, observed, message
            )
        }
        OutcomeStatus::DidNotFail => format!(
            "{} did not fail: expected {}, but the operation completed normally (fixture assumption violated)",
            outcome.probe_name, outcome.expected_kind
        ),
    }
}

/// Render all outcomes followed by the summary line
pub fn render(outcomes: &[Outcome]) -> String {
    let mut output = String::new();
    for outcome in outcomes {
        output.push_str(&render_line(outcome));
        output.push('\n');
    }
    output.push_str(&summarize(outcomes).to_string());
    output.push('\n');
    output
}

/// Render a run report as pretty-printed JSON
pub fn render_json(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
