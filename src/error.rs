//! Error types shared by the field parsers and the line dispatcher.

use std::num::ParseIntError;
use thiserror::Error;

use crate::rst::RstError;
use crate::timestamp::TimestampError;

/// Broad classification of a fatal parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong number of tokens for a record.
    Structural,
    /// Unparsable date, time, digit or integer.
    Format,
    /// A field exceeded its maximum length.
    Length,
    /// Too many occurrences of a repeatable field.
    Cardinality,
    /// `CATEGORY-` tag naming a category outside the recognized set.
    UnknownCategory,
    /// Malformed `EMAIL:` value.
    InvalidEmail,
}

/// A failure parsing a single field or record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("invalid number of fields in {record}: got {actual}, expected {expected}")]
    FieldCount {
        record: &'static str,
        actual: usize,
        expected: String,
    },

    #[error("exchange must contain at least one field")]
    EmptyExchange,

    #[error("exchange width {0} is too large")]
    ExchangeTooWide(usize),

    #[error("parsing {field}: {source}")]
    Rst {
        field: &'static str,
        source: RstError,
    },

    #[error("parsing {field}: {source}")]
    Timestamp {
        field: &'static str,
        source: TimestampError,
    },

    #[error("parsing {field} {value:?}: {source}")]
    Integer {
        field: &'static str,
        value: String,
        source: ParseIntError,
    },

    #[error("cannot parse {0:?} as either YES or NO")]
    YesNo(String),

    #[error("{field} too long (maximum length {max} characters)")]
    TooLong { field: &'static str, max: usize },

    #[error("only allowed up to {max} {field} lines")]
    TooManyLines { field: &'static str, max: usize },

    #[error("unknown category {0:?}")]
    UnknownCategory(String),

    #[error("parsing email address {0:?}")]
    InvalidEmail(String),
}

impl FieldError {
    /// The broad kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FieldError::FieldCount { .. }
            | FieldError::EmptyExchange
            | FieldError::ExchangeTooWide(_) => ErrorKind::Structural,
            FieldError::Rst { .. }
            | FieldError::Timestamp { .. }
            | FieldError::Integer { .. }
            | FieldError::YesNo(_) => ErrorKind::Format,
            FieldError::TooLong { .. } => ErrorKind::Length,
            FieldError::TooManyLines { .. } => ErrorKind::Cardinality,
            FieldError::UnknownCategory(_) => ErrorKind::UnknownCategory,
            FieldError::InvalidEmail(_) => ErrorKind::InvalidEmail,
        }
    }

    pub(crate) fn integer(field: &'static str, value: &str, source: ParseIntError) -> Self {
        FieldError::Integer {
            field,
            value: value.to_string(),
            source,
        }
    }
}

/// A fatal error annotated with the 0-based index of the offending line.
///
/// Renders as `"<line>: <message>"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}: {error}")]
pub struct ParseError {
    pub line: usize,
    #[source]
    pub error: FieldError,
}

impl ParseError {
    pub fn new(line: usize, error: FieldError) -> Self {
        Self { line, error }
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

/// Result type for field-level parsing.
pub type FieldResult<T> = Result<T, FieldError>;
