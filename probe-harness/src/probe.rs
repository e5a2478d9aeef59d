//! Probe and outcome types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::failure::{FailureKind, ProbeError};

/// What a probe body returns: `Ok` when the operation completed normally
pub type ProbeResult = Result<(), ProbeError>;

type ProbeBody = Box<dyn Fn() -> ProbeResult>;

/// A named fallible operation paired with the failure it is expected to produce
pub struct ProbeSpec {
    name: String,
    expected_kind: FailureKind,
    body: ProbeBody,
}

impl ProbeSpec {
    /// Create a new probe
    pub fn new(
        name: impl Into<String>,
        expected_kind: FailureKind,
        body: impl Fn() -> ProbeResult + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            expected_kind,
            body: Box::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expected_kind(&self) -> &FailureKind {
        &self.expected_kind
    }

    /// Run the body once. Panics are not caught here; see `runner::run_one`.
    pub(crate) fn invoke(&self) -> ProbeResult {
        (self.body)()
    }
}

impl fmt::Debug for ProbeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeSpec")
            .field("name", &self.name)
            .field("expected_kind", &self.expected_kind)
            .finish_non_exhaustive()
    }
}

/// How a probe's result compared with its expectation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeStatus {
    /// Failed with the expected kind
    Matched,
    /// Failed, but with a different kind
    Unmatched,
    /// Completed without failing
    DidNotFail,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeStatus::Matched => write!(f, "Matched"),
            OutcomeStatus::Unmatched => write!(f, "Unmatched"),
            OutcomeStatus::DidNotFail => write!(f, "DidNotFail"),
        }
    }
}

/// Recorded result of running one probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Name of the probe that produced this outcome
    pub probe_name: String,
    pub status: OutcomeStatus,
    /// Kind the probe was expected to fail with
    pub expected_kind: FailureKind,
    /// Kind the probe actually failed with, if it failed
    pub observed_kind: Option<FailureKind>,
    /// Message of the observed failure, if it failed
    pub observed_message: Option<String>,
    /// Wall time spent in the body
    pub elapsed_ms: u64,
}

impl Outcome {
    pub fn is_matched(&self) -> bool {
        self.status == OutcomeStatus::Matched
    }
}
