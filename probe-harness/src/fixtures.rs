//! Standard probe fixtures
//!
//! Eleven operations that are each known to fail with a specific kind. The
//! helpers are public so individual faults can be exercised on their own.

use std::any::{self, Any};
use std::fs::File;
use std::io::{BufReader, Read};
use std::net::{SocketAddr, TcpStream};
use std::path::Path;
use std::time::Duration;

use crate::failure::{FailureKind, ProbeError};
use crate::probe::{ProbeResult, ProbeSpec};
use crate::report::RunReport;

/// Address a local MySQL server would listen on
pub const DATABASE_ADDR: &str = "127.0.0.1:3306";
pub const DATABASE_NAME: &str = "nonexistentdb";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// The fixed list of probes, in run order
pub fn standard_probes() -> Vec<ProbeSpec> {
    vec![
        ProbeSpec::new("MissingFile", FailureKind::ResourceNotFound, || {
            open_for_reading("non_existent_file.txt")
        }),
        ProbeSpec::new("MissingInputStream", FailureKind::ResourceNotFound, || {
            open_input_stream("missing_file.txt")
        }),
        ProbeSpec::new("EmptyStream", FailureKind::StreamExhausted, || {
            read_prefixed_string(&mut std::io::empty()).map(|_| ())
        }),
        ProbeSpec::new(
            "DatabaseConnect",
            FailureKind::ExternalServiceUnavailable,
            || connect_database(DATABASE_ADDR, DATABASE_NAME),
        ),
        ProbeSpec::new("MissingDefinition", FailureKind::DefinitionNotFound, || {
            resolve_definition("com.nonexistent.Class").map(|_| ())
        }),
        ProbeSpec::new("DivideByZero", FailureKind::InvalidComputation, || {
            divide(10, 0).map(|_| ())
        }),
        ProbeSpec::new("NullAccess", FailureKind::MissingReference, || {
            text_length(None).map(|_| ())
        }),
        ProbeSpec::new("BadIndex", FailureKind::IndexOutOfRange, || {
            element_at(&[1, 2, 3], 5).map(|_| ())
        }),
        ProbeSpec::new("BadCast", FailureKind::TypeMismatch, || {
            cast::<String>(Box::new(10_i32)).map(|_| ())
        }),
        ProbeSpec::new("BadArgument", FailureKind::InvalidArgument, || {
            ThreadPriority::new(11).map(|_| ())
        }),
        ProbeSpec::new("BadParse", FailureKind::MalformedInput, || {
            parse_integer("abc").map(|_| ())
        }),
    ]
}

/// Open a file for buffered reading
pub fn open_for_reading(path: impl AsRef<Path>) -> ProbeResult {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ProbeError::from(e).with_context(path.display()))?;
    let _reader = BufReader::new(file);
    Ok(())
}

/// Open a file as a raw byte stream and pull its first byte
pub fn open_input_stream(path: impl AsRef<Path>) -> ProbeResult {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ProbeError::from(e).with_context(path.display()))?;
    file.bytes()
        .next()
        .transpose()
        .map_err(|e| ProbeError::from(e).with_context(path.display()))?;
    Ok(())
}

/// Read a UTF-8 string preceded by a big-endian u16 byte length
pub fn read_prefixed_string(reader: &mut impl Read) -> Result<String, ProbeError> {
    let mut len = [0u8; 2];
    reader
        .read_exact(&mut len)
        .map_err(|e| ProbeError::from(e).with_context("reading string length"))?;

    let mut bytes = vec![0u8; usize::from(u16::from_be_bytes(len))];
    reader
        .read_exact(&mut bytes)
        .map_err(|e| ProbeError::from(e).with_context("reading string body"))?;

    String::from_utf8(bytes)
        .map_err(|e| ProbeError::new(FailureKind::MalformedInput, e.to_string()))
}

/// Open (and immediately drop) a TCP connection to a database server
pub fn connect_database(addr: &str, database: &str) -> ProbeResult {
    let socket: SocketAddr = addr.parse().map_err(|e: std::net::AddrParseError| {
        ProbeError::new(FailureKind::InvalidArgument, format!("{}: {}", addr, e))
    })?;
    let _stream = TcpStream::connect_timeout(&socket, CONNECT_TIMEOUT).map_err(|e| {
        ProbeError::from(e).with_context(format!("connecting to database '{}' at {}", database, addr))
    })?;
    Ok(())
}

/// Names of the definitions this crate can resolve
pub fn registered_definitions() -> [&'static str; 4] {
    [
        any::type_name::<ProbeSpec>(),
        any::type_name::<ProbeError>(),
        any::type_name::<RunReport>(),
        any::type_name::<ThreadPriority>(),
    ]
}

/// Look up a definition by its fully qualified name
pub fn resolve_definition(name: &str) -> Result<&'static str, ProbeError> {
    registered_definitions()
        .into_iter()
        .find(|definition| *definition == name)
        .ok_or_else(|| ProbeError::new(FailureKind::DefinitionNotFound, name))
}

pub fn divide(dividend: i32, divisor: i32) -> Result<i32, ProbeError> {
    dividend.checked_div(divisor).ok_or_else(|| {
        let message = if divisor == 0 {
            "/ by zero".to_string()
        } else {
            format!("{} / {} overflows", dividend, divisor)
        };
        ProbeError::new(FailureKind::InvalidComputation, message)
    })
}

pub fn text_length(text: Option<&str>) -> Result<usize, ProbeError> {
    text.map(str::len).ok_or_else(|| {
        ProbeError::new(
            FailureKind::MissingReference,
            "cannot read the length of an absent string",
        )
    })
}

pub fn element_at(values: &[i32], index: usize) -> Result<i32, ProbeError> {
    values.get(index).copied().ok_or_else(|| {
        ProbeError::new(
            FailureKind::IndexOutOfRange,
            format!("index {} out of bounds for length {}", index, values.len()),
        )
    })
}

/// Recover a concrete type from a type-erased value
pub fn cast<T: Any>(value: Box<dyn Any>) -> Result<Box<T>, ProbeError> {
    value.downcast::<T>().map_err(|_| {
        ProbeError::new(
            FailureKind::TypeMismatch,
            format!("value cannot be cast to {}", short_type_name::<T>()),
        )
    })
}

/// Type name without its module path (`alloc::string::String` -> `String`)
fn short_type_name<T: ?Sized>() -> &'static str {
    let name = any::type_name::<T>();
    match name.find('<') {
        Some(_) => name,
        None => name.rsplit("::").next().unwrap_or(name),
    }
}

/// Scheduling priority in the range 1..=10
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ThreadPriority(u8);

impl ThreadPriority {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: i32) -> Result<Self, ProbeError> {
        let value = u8::try_from(value)
            .map_err(|e| ProbeError::from(e).with_context(format!("thread priority {}", value)))?;
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ProbeError::new(
                FailureKind::InvalidArgument,
                format!(
                    "thread priority {} outside {}..={}",
                    value,
                    Self::MIN,
                    Self::MAX
                ),
            ));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

pub fn parse_integer(text: &str) -> Result<i32, ProbeError> {
    text.parse::<i32>()
        .map_err(|e| ProbeError::from(e).with_context(format!("for input string \"{}\"", text)))
}
