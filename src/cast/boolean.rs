//! Casts from boolean sources.

use super::CastContext;
use crate::error::CastResult;
use crate::value::{Kind, Timestamp};

pub fn to_integer(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub fn to_float(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

pub fn to_string(value: bool) -> String {
    if value {
        "true".to_string()
    } else {
        "false".to_string()
    }
}

/// No instant corresponds to a truth value.
pub fn to_timestamp(_value: bool, ctx: &CastContext<'_>) -> CastResult<Timestamp> {
    Err(ctx.unsupported(Kind::Boolean, Kind::Timestamp))
}

pub fn to_json(value: bool) -> serde_json::Value {
    serde_json::Value::Bool(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_casts() {
        assert_eq!(to_integer(true), 1);
        assert_eq!(to_integer(false), 0);
        assert_eq!(to_float(true), 1.0);
        assert_eq!(to_string(false), "false");
        assert_eq!(to_json(true), serde_json::Value::Bool(true));
    }

    #[test]
    fn test_timestamp_always_fails() {
        let ctx = CastContext::new("flag");
        assert!(to_timestamp(true, &ctx).is_err());
        assert!(to_timestamp(false, &ctx).is_err());
    }
}
