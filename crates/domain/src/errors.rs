use thiserror::Error;

/// Failure while reading zone master-file text or building a record from it.
///
/// `line` is 1-based. A line of 0 means the error is not tied to a document
/// position (for example a record built directly through `DomainRecord::new`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("line {line}: invalid time literal '{literal}'")]
    InvalidTimeLiteral { line: usize, literal: String },

    #[error("line {line}: unknown directive {directive}")]
    UnknownDirective { line: usize, directive: String },

    #[error("line {line}: {record_type} expects {expected} field(s), found {found}")]
    FieldArityMismatch {
        line: usize,
        record_type: String,
        expected: String,
        found: usize,
    },

    /// A relative name, or a record without its own ttl, met before the
    /// `$ORIGIN` or `$TTL` it depends on. `name` is what could not be resolved.
    #[error("line {line}: '{name}' needs an origin or default ttl that is not set")]
    MissingOrigin { line: usize, name: String },

    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },
}

impl ParseError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        ParseError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ParseError::MalformedRecord { line, .. }
            | ParseError::InvalidTimeLiteral { line, .. }
            | ParseError::UnknownDirective { line, .. }
            | ParseError::FieldArityMismatch { line, .. }
            | ParseError::MissingOrigin { line, .. }
            | ParseError::UnterminatedQuote { line } => *line,
        }
    }

    /// Re-anchors an error produced by a line-agnostic helper.
    pub fn at_line(mut self, at: usize) -> Self {
        match &mut self {
            ParseError::MalformedRecord { line, .. }
            | ParseError::InvalidTimeLiteral { line, .. }
            | ParseError::UnknownDirective { line, .. }
            | ParseError::FieldArityMismatch { line, .. }
            | ParseError::MissingOrigin { line, .. }
            | ParseError::UnterminatedQuote { line } => *line = at,
        }
        self
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("unsupported record type or class: {0}")]
    UnsupportedRecordType(String),

    #[error("field {field} cannot be encoded: {reason}")]
    FieldEncodingOverflow { field: String, reason: String },

    #[error("malformed wire data: {0}")]
    MalformedWire(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("more than one zone claims origin {0}")]
    AmbiguousOrigin(String),
}

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Zone source {location} unavailable: {reason}")]
    ZoneSourceUnavailable { location: String, reason: String },

    #[error("Zone not found: {0}")]
    ZoneNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
