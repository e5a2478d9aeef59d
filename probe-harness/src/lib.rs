//! probe-harness library
//!
//! Runs named fallible operations and reports whether each one failed the
//! way it was expected to.

pub mod commands;
pub mod failure;
pub mod fixtures;
pub mod probe;
pub mod report;
pub mod runner;

pub use failure::{FailureKind, ProbeError};
pub use probe::{Outcome, OutcomeStatus, ProbeResult, ProbeSpec};
pub use report::{RunReport, Summary};
