//! Failure taxonomy for probes
//!
//! Every failure a probe body can signal collapses to a kind tag plus a message:
//! - I/O errors are classified by their `io::ErrorKind`
//! - parse and integer conversion errors map to fixed kinds
//! - anything outside the taxonomy is kept as `Unclassified` with its raw kind

use std::fmt;
use std::io;
use std::num::{ParseIntError, TryFromIntError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of failure a probe body signalled
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// A named resource (file, path) does not exist
    ResourceNotFound,
    /// A stream ended before the requested data could be read
    StreamExhausted,
    /// An external service (database, remote endpoint) refused or dropped the connection
    ExternalServiceUnavailable,
    /// A named definition could not be resolved
    DefinitionNotFound,
    /// Arithmetic with no defined result (division by zero, overflow)
    InvalidComputation,
    /// A required value was absent
    MissingReference,
    /// A position outside the bounds of a sequence
    IndexOutOfRange,
    /// A value could not be treated as the requested type
    TypeMismatch,
    /// An argument outside the accepted domain
    InvalidArgument,
    /// Text that does not have the expected shape
    MalformedInput,
    /// Anything the taxonomy does not cover, tagged with the raw kind
    Unclassified(String),
}

impl FailureKind {
    /// Classify an I/O error kind
    pub fn from_io(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => FailureKind::ResourceNotFound,
            io::ErrorKind::UnexpectedEof => FailureKind::StreamExhausted,
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::AddrNotAvailable => FailureKind::ExternalServiceUnavailable,
            io::ErrorKind::InvalidInput => FailureKind::InvalidArgument,
            io::ErrorKind::InvalidData => FailureKind::MalformedInput,
            other => FailureKind::Unclassified(format!("io::{:?}", other)),
        }
    }

    /// Whether this kind belongs to the taxonomy
    pub fn is_classified(&self) -> bool {
        !matches!(self, FailureKind::Unclassified(_))
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::ResourceNotFound => write!(f, "ResourceNotFound"),
            FailureKind::StreamExhausted => write!(f, "StreamExhausted"),
            FailureKind::ExternalServiceUnavailable => write!(f, "ExternalServiceUnavailable"),
            FailureKind::DefinitionNotFound => write!(f, "DefinitionNotFound"),
            FailureKind::InvalidComputation => write!(f, "InvalidComputation"),
            FailureKind::MissingReference => write!(f, "MissingReference"),
            FailureKind::IndexOutOfRange => write!(f, "IndexOutOfRange"),
            FailureKind::TypeMismatch => write!(f, "TypeMismatch"),
            FailureKind::InvalidArgument => write!(f, "InvalidArgument"),
            FailureKind::MalformedInput => write!(f, "MalformedInput"),
            FailureKind::Unclassified(raw) => write!(f, "Unclassified({})", raw),
        }
    }
}

/// A failure signalled by a probe body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProbeError {
    /// Kind tag used for classification
    pub kind: FailureKind,
    /// Human-readable message
    pub message: String,
}

impl ProbeError {
    /// Create a new probe error
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Failure outside the taxonomy, tagged with its raw kind
    pub fn unclassified(raw_kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unclassified(raw_kind.into()), message)
    }

    /// Prefix the message with what was being attempted
    pub fn with_context(mut self, context: impl fmt::Display) -> Self {
        self.message = format!("{}: {}", context, self.message);
        self
    }
}

impl From<io::Error> for ProbeError {
    fn from(err: io::Error) -> Self {
        Self::new(FailureKind::from_io(err.kind()), err.to_string())
    }
}

impl From<ParseIntError> for ProbeError {
    fn from(err: ParseIntError) -> Self {
        Self::new(FailureKind::MalformedInput, err.to_string())
    }
}

impl From<TryFromIntError> for ProbeError {
    fn from(err: TryFromIntError) -> Self {
        Self::new(FailureKind::InvalidArgument, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_kind_mapping() {
        assert_eq!(
            FailureKind::from_io(io::ErrorKind::NotFound),
            FailureKind::ResourceNotFound
        );
        assert_eq!(
            FailureKind::from_io(io::ErrorKind::UnexpectedEof),
            FailureKind::StreamExhausted
        );
        assert_eq!(
            FailureKind::from_io(io::ErrorKind::ConnectionRefused),
            FailureKind::ExternalServiceUnavailable
        );
        assert_eq!(
            FailureKind::from_io(io::ErrorKind::InvalidData),
            FailureKind::MalformedInput
        );
    }

    #[test]
    fn test_timeout_is_unclassified() {
        let kind = FailureKind::from_io(io::ErrorKind::TimedOut);
        assert_eq!(kind, FailureKind::Unclassified("io::TimedOut".to_string()));
        assert!(!kind.is_classified());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(format!("{}", FailureKind::ResourceNotFound), "ResourceNotFound");
        assert_eq!(format!("{}", FailureKind::MalformedInput), "MalformedInput");
        assert_eq!(
            format!("{}", FailureKind::Unclassified("panic".to_string())),
            "Unclassified(panic)"
        );
    }

    #[test]
    fn test_from_io_error_keeps_message() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let probe_err = ProbeError::from(err).with_context("data.txt");
        assert_eq!(probe_err.kind, FailureKind::ResourceNotFound);
        assert_eq!(probe_err.to_string(), "data.txt: gone");
    }

    #[test]
    fn test_from_parse_error() {
        let err = "abc".parse::<i32>().unwrap_err();
        let probe_err = ProbeError::from(err);
        assert_eq!(probe_err.kind, FailureKind::MalformedInput);
        assert!(probe_err.message.contains("invalid digit"));
    }

    #[test]
    fn test_from_try_from_int_error() {
        let err = u8::try_from(300_i32).unwrap_err();
        assert_eq!(ProbeError::from(err).kind, FailureKind::InvalidArgument);
    }
}
