//! Error types for TOON encoding and decoding.
//!
//! Every fallible operation in this crate returns exactly one of the
//! variants below. The codec never recovers internally and never produces
//! partial output: `encode` builds its document in memory and returns it
//! whole or not at all, and `decode` returns a complete tree or the first
//! error it hit, annotated with the offending line.
//!
//! ## Examples
//!
//! ```rust
//! use toon::{decode, Error};
//!
//! // Strict mode (the default) verifies declared array lengths.
//! let err = decode("tags[3]: a,b").unwrap_err();
//! assert!(matches!(err, Error::CountMismatch { expected: 3, found: 2, .. }));
//! ```

use std::fmt;
use thiserror::Error;

/// All errors that can occur while encoding or decoding TOON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The value cannot be represented in TOON (e.g. a map with non-string
    /// keys). Raised before any output is produced.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// The options are invalid for the requested operation, such as a zero
    /// indent combined with a document that needs indented blocks.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// Malformed TOON text: misindentation, a missing colon, an unclosed
    /// quote, an unknown escape, or a rejected `#` length marker.
    #[error("syntax error at line {line}, column {column}: {msg}")]
    Syntax {
        line: usize,
        column: usize,
        msg: String,
    },

    /// A strict-mode decoder found a different number of array elements or
    /// table rows than the header declared. `line` points at the header.
    #[error("length mismatch at line {line}: header declares {expected} but found {found}")]
    CountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Reading from or writing to an I/O stream failed.
    #[error("io error: {0}")]
    Io(String),

    /// A message produced through serde's `ser::Error`/`de::Error` hooks.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a syntax error at a 1-based line and column.
    pub(crate) fn syntax(line: usize, column: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            column,
            msg: msg.into(),
        }
    }

    pub(crate) fn count_mismatch(line: usize, expected: usize, found: usize) -> Self {
        Error::CountMismatch {
            line,
            expected,
            found,
        }
    }

    pub(crate) fn unsupported(msg: impl Into<String>) -> Self {
        Error::UnsupportedValue(msg.into())
    }

    pub(crate) fn invalid_options(msg: impl Into<String>) -> Self {
        Error::InvalidOptions(msg.into())
    }

    pub(crate) fn io(msg: impl fmt::Display) -> Self {
        Error::Io(msg.to_string())
    }

    /// The 1-based line the error was detected on, where meaningful.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line, .. } | Error::CountMismatch { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
