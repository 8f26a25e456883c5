//! The primitive cast matrix.
//!
//! One submodule per source kind, one function per destination kind. The
//! top-level [`apply`] is an exhaustive match over the full
//! (source kind, destination kind) grid, so a missing entry is a compile
//! error rather than a runtime fallback.
//!
//! Same-kind casts are identity; well-formedness of timestamps and json
//! trees is enforced by their constructors, so identity needs no revalidation.

pub mod boolean;
pub mod float;
pub mod integer;
pub mod json;
pub mod string;
pub mod timestamp;

use crate::error::{CastError, CastResult};
use crate::timestamp::{TimestampFormatter, TimestampParser};
use crate::value::{Kind, Value};

/// Per-cast context: the column (or normalized path) being cast, plus the
/// pre-resolved timestamp parser/formatter when the bind step produced one.
#[derive(Debug, Clone, Copy)]
pub struct CastContext<'a> {
    column: &'a str,
    parser: Option<&'a TimestampParser>,
    formatter: Option<&'a TimestampFormatter>,
}

impl<'a> CastContext<'a> {
    pub fn new(column: &'a str) -> Self {
        Self {
            column,
            parser: None,
            formatter: None,
        }
    }

    pub fn with_parser(mut self, parser: Option<&'a TimestampParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_formatter(mut self, formatter: Option<&'a TimestampFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn column(&self) -> &str {
        self.column
    }

    pub(crate) fn parser(&self) -> Option<&'a TimestampParser> {
        self.parser
    }

    pub(crate) fn formatter(&self) -> Option<&'a TimestampFormatter> {
        self.formatter
    }

    pub(crate) fn unsupported(&self, from: Kind, to: Kind) -> CastError {
        CastError::Unsupported {
            column: self.column.to_string(),
            from,
            to,
        }
    }

    pub(crate) fn invalid(&self, from: Kind, to: Kind, reason: impl Into<String>) -> CastError {
        CastError::Invalid {
            column: self.column.to_string(),
            from,
            to,
            reason: reason.into(),
        }
    }
}

/// Cast one value to the target kind. Total over all 36 pairs.
pub fn apply(value: Value, target: Kind, ctx: &CastContext<'_>) -> CastResult<Value> {
    match (value, target) {
        (Value::Boolean(v), Kind::Boolean) => Ok(Value::Boolean(v)),
        (Value::Boolean(v), Kind::Integer) => Ok(Value::Integer(boolean::to_integer(v))),
        (Value::Boolean(v), Kind::Float) => Ok(Value::Float(boolean::to_float(v))),
        (Value::Boolean(v), Kind::String) => Ok(Value::String(boolean::to_string(v))),
        (Value::Boolean(v), Kind::Timestamp) => {
            boolean::to_timestamp(v, ctx).map(Value::Timestamp)
        }
        (Value::Boolean(v), Kind::Json) => Ok(Value::Json(boolean::to_json(v))),

        (Value::Integer(v), Kind::Boolean) => Ok(Value::Boolean(integer::to_boolean(v))),
        (Value::Integer(v), Kind::Integer) => Ok(Value::Integer(v)),
        (Value::Integer(v), Kind::Float) => Ok(Value::Float(integer::to_float(v))),
        (Value::Integer(v), Kind::String) => Ok(Value::String(integer::to_string(v))),
        (Value::Integer(v), Kind::Timestamp) => {
            Ok(Value::Timestamp(integer::to_timestamp(v)))
        }
        (Value::Integer(v), Kind::Json) => Ok(Value::Json(integer::to_json(v))),

        (Value::Float(v), Kind::Boolean) => Ok(Value::Boolean(float::to_boolean(v))),
        (Value::Float(v), Kind::Integer) => float::to_integer(v, ctx).map(Value::Integer),
        (Value::Float(v), Kind::Float) => Ok(Value::Float(v)),
        (Value::Float(v), Kind::String) => Ok(Value::String(float::to_string(v))),
        (Value::Float(v), Kind::Timestamp) => float::to_timestamp(v, ctx).map(Value::Timestamp),
        (Value::Float(v), Kind::Json) => float::to_json(v, ctx).map(Value::Json),

        (Value::String(v), Kind::Boolean) => string::to_boolean(&v, ctx).map(Value::Boolean),
        (Value::String(v), Kind::Integer) => string::to_integer(&v, ctx).map(Value::Integer),
        (Value::String(v), Kind::Float) => string::to_float(&v, ctx).map(Value::Float),
        (Value::String(v), Kind::String) => Ok(Value::String(v)),
        (Value::String(v), Kind::Timestamp) => {
            string::to_timestamp(&v, ctx).map(Value::Timestamp)
        }
        (Value::String(v), Kind::Json) => string::to_json(&v, ctx).map(Value::Json),

        (Value::Timestamp(v), Kind::Boolean) => {
            timestamp::to_boolean(v, ctx).map(Value::Boolean)
        }
        (Value::Timestamp(v), Kind::Integer) => Ok(Value::Integer(timestamp::to_integer(v))),
        (Value::Timestamp(v), Kind::Float) => Ok(Value::Float(timestamp::to_float(v))),
        (Value::Timestamp(v), Kind::String) => timestamp::to_string(v, ctx).map(Value::String),
        (Value::Timestamp(v), Kind::Timestamp) => Ok(Value::Timestamp(v)),
        (Value::Timestamp(v), Kind::Json) => timestamp::to_json(v, ctx).map(Value::Json),

        (Value::Json(v), Kind::Boolean) => json::to_boolean(&v, ctx).map(Value::Boolean),
        (Value::Json(v), Kind::Integer) => json::to_integer(&v, ctx).map(Value::Integer),
        (Value::Json(v), Kind::Float) => json::to_float(&v, ctx).map(Value::Float),
        (Value::Json(v), Kind::String) => json::to_string(&v, ctx).map(Value::String),
        (Value::Json(v), Kind::Timestamp) => json::to_timestamp(&v, ctx).map(Value::Timestamp),
        (Value::Json(v), Kind::Json) => Ok(Value::Json(v)),
    }
}
