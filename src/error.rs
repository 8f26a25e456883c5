//! Error types for the casting engine.
//!
//! Two families, matching the two moments things can go wrong:
//!
//! - [`ConfigError`] - rejected while binding schemas and cast rules;
//!   always fatal to the bind operation
//! - [`CastError`] - a specific (source kind, destination kind, value)
//!   combination has no valid conversion at record-processing time
//!
//! `CastError` messages identify the column (or path) and the kinds involved
//! but never echo the offending value: field contents may be sensitive and
//! belong to the host, not to error logs.

use crate::value::Kind;
use thiserror::Error;

// =============================================================================
// Configuration Errors (bind time)
// =============================================================================

/// Errors detected once, while resolving configuration against a schema pair.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Column identifier contains path syntax the compiler cannot parse.
    #[error("invalid path syntax in '{name}': {message}")]
    InvalidPath { name: String, message: String },

    /// Identifier (or path root) does not name an input column.
    #[error("unknown input column: {0}")]
    UnknownColumn(String),

    /// Schema construction saw the same column name twice.
    #[error("duplicate column in schema: {0}")]
    DuplicateColumn(String),

    /// Two cast rules resolve to the same column or path.
    #[error("duplicate cast rule for '{0}'")]
    DuplicateRule(String),

    /// A path rule can only reach inside string or json columns.
    #[error("path rule '{column}' addresses a {kind} column")]
    PathIntoScalar { column: String, kind: Kind },

    /// No timestamp representation exists inside a json tree.
    #[error("path rule '{0}' cannot target timestamp")]
    PathTimestampTarget(String),

    /// Timestamp format string failed to compile.
    #[error("invalid timestamp format '{format}' for column '{column}'")]
    InvalidFormat { column: String, format: String },

    /// Timezone string is not UTC or a fixed offset.
    #[error("invalid timezone '{timezone}' for column '{column}'")]
    InvalidTimezone { column: String, timezone: String },

    /// Default date string is not a calendar date.
    #[error("invalid default date '{date}' for column '{column}'")]
    InvalidDate { column: String, date: String },

    /// Output column kind disagrees with the rule (or with the input kind
    /// when no rule is registered).
    #[error("output column '{column}' is declared {declared} but casts resolve to {expected}")]
    SchemaMismatch {
        column: String,
        declared: Kind,
        expected: Kind,
    },
}

// =============================================================================
// Cast Errors (record time)
// =============================================================================

/// Errors raised synchronously from a single cast call.
///
/// The engine never retries and never substitutes defaults; the host's
/// record-processing loop decides whether to abort or skip.
#[derive(Debug, Error, PartialEq)]
pub enum CastError {
    /// The (source, destination) pair has no valid conversion at all.
    #[error("cannot cast {from} to {to} for '{column}'")]
    Unsupported {
        column: String,
        from: Kind,
        to: Kind,
    },

    /// The pair is convertible in general but this value is not.
    #[error("cannot cast {from} value to {to} for '{column}': {reason}")]
    Invalid {
        column: String,
        from: Kind,
        to: Kind,
        reason: String,
    },
}

impl CastError {
    /// Column name or normalized path the failing cast was registered for.
    pub fn column(&self) -> &str {
        match self {
            CastError::Unsupported { column, .. } => column,
            CastError::Invalid { column, .. } => column,
        }
    }

    /// (source kind, destination kind) of the failing cast.
    pub fn kinds(&self) -> (Kind, Kind) {
        match self {
            CastError::Unsupported { from, to, .. } => (*from, *to),
            CastError::Invalid { from, to, .. } => (*from, *to),
        }
    }
}

/// Result type for bind operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for cast operations.
pub type CastResult<T> = Result<T, CastError>;
