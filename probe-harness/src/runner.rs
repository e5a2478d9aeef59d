//! Probe runner
//!
//! Executes probes in order, each under its own failure boundary, and
//! classifies every result into an [`Outcome`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::failure::{FailureKind, ProbeError};
use crate::probe::{Outcome, OutcomeStatus, ProbeResult, ProbeSpec};

/// Run every probe in order, producing one outcome per probe
pub fn run(specs: &[ProbeSpec]) -> Vec<Outcome> {
    specs.iter().map(run_one).collect()
}

/// Run a single probe. Never panics and never returns the body's error.
pub fn run_one(spec: &ProbeSpec) -> Outcome {
    debug!(probe = spec.name(), expected = %spec.expected_kind(), "running probe");

    let started = Instant::now();
    let result = match panic::catch_unwind(AssertUnwindSafe(|| spec.invoke())) {
        Ok(result) => result,
        Err(payload) => Err(ProbeError::unclassified(
            "panic",
            panic_message(payload.as_ref()),
        )),
    };
    let outcome = classify(spec.name(), spec.expected_kind(), result, started.elapsed());

    match outcome.status {
        OutcomeStatus::Matched => {
            debug!(probe = %outcome.probe_name, elapsed_ms = outcome.elapsed_ms, "probe matched")
        }
        OutcomeStatus::Unmatched => warn!(
            probe = %outcome.probe_name,
            expected = %outcome.expected_kind,
            observed = ?outcome.observed_kind,
            "probe failed with an unexpected kind"
        ),
        OutcomeStatus::DidNotFail => warn!(
            probe = %outcome.probe_name,
            expected = %outcome.expected_kind,
            "probe completed without failing"
        ),
    }

    outcome
}

/// Compare a body's result with the kind it was expected to fail with
pub fn classify(
    probe_name: &str,
    expected_kind: &FailureKind,
    result: ProbeResult,
    elapsed: Duration,
) -> Outcome {
    let (status, observed_kind, observed_message) = match result {
        Ok(()) => (OutcomeStatus::DidNotFail, None, None),
        Err(err) => {
            let status = if &err.kind == expected_kind {
                OutcomeStatus::Matched
            } else {
                OutcomeStatus::Unmatched
            };
            (status, Some(err.kind), Some(err.message))
        }
    };

    Outcome {
        probe_name: probe_name.to_string(),
        status,
        expected_kind: expected_kind.clone(),
        observed_kind,
        observed_message,
        elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}
