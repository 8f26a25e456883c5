//! Runtime values for the casting engine.
//!
//! A record field carries exactly one [`Value`], tagged with one of the six
//! [`Kind`]s the engine knows how to convert between. Values are created when
//! a field is read and consumed when the cast result is written out; nothing
//! in this module is mutated in place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six value categories the cast matrix is defined over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Boolean,
    Integer,
    Float,
    String,
    Timestamp,
    Json,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Timestamp => "timestamp",
            Kind::Json => "json",
        };
        f.write_str(name)
    }
}

/// A timezone-naive instant: seconds since the Unix epoch plus a nanosecond
/// fraction in `[0, 1_000_000_000)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    epoch_second: i64,
    nanos: u32,
}

impl Timestamp {
    /// Build an instant, carrying overflowing nanoseconds into seconds.
    pub fn new(epoch_second: i64, nanos: u32) -> Self {
        let carry = (nanos / 1_000_000_000) as i64;
        Self {
            epoch_second: epoch_second.saturating_add(carry),
            nanos: nanos % 1_000_000_000,
        }
    }

    /// Whole-second instant.
    pub fn from_epoch_second(epoch_second: i64) -> Self {
        Self { epoch_second, nanos: 0 }
    }

    pub fn epoch_second(&self) -> i64 {
        self.epoch_second
    }

    pub fn nanos(&self) -> u32 {
        self.nanos
    }
}

/// A single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Timestamp(Timestamp),
    Json(serde_json::Value),
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Boolean(_) => Kind::Boolean,
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Timestamp(_) => Kind::Timestamp,
            Value::Json(_) => Kind::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_normalizes_nanos() {
        let t = Timestamp::new(10, 1_500_000_000);
        assert_eq!(t.epoch_second(), 11);
        assert_eq!(t.nanos(), 500_000_000);
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(Value::Boolean(true).kind(), Kind::Boolean);
        assert_eq!(Value::Integer(1).kind(), Kind::Integer);
        assert_eq!(Value::Float(1.0).kind(), Kind::Float);
        assert_eq!(Value::String("x".into()).kind(), Kind::String);
        assert_eq!(
            Value::Timestamp(Timestamp::from_epoch_second(0)).kind(),
            Kind::Timestamp
        );
        assert_eq!(Value::Json(serde_json::json!(null)).kind(), Kind::Json);
    }

    #[test]
    fn test_kind_serde_names() {
        let kind: Kind = serde_json::from_str("\"timestamp\"").unwrap();
        assert_eq!(kind, Kind::Timestamp);
        assert_eq!(serde_json::to_string(&Kind::Json).unwrap(), "\"json\"");
    }
}
