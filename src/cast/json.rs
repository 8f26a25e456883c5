//! Casts from structured (json) sources.
//!
//! Scalar targets unwrap the matching json scalar. Json-to-string is total:
//! a json string unwraps to its contents, anything else is rendered as
//! compact json text.

use super::CastContext;
use crate::error::CastResult;
use crate::value::{Kind, Timestamp};
use serde_json::Value as JsonValue;

pub fn to_boolean(value: &JsonValue, ctx: &CastContext<'_>) -> CastResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| ctx.invalid(Kind::Json, Kind::Boolean, "not a json boolean"))
}

/// Unwraps integral json numbers only; `1.5` has no integer counterpart.
pub fn to_integer(value: &JsonValue, ctx: &CastContext<'_>) -> CastResult<i64> {
    value
        .as_i64()
        .ok_or_else(|| ctx.invalid(Kind::Json, Kind::Integer, "not an integral json number"))
}

pub fn to_float(value: &JsonValue, ctx: &CastContext<'_>) -> CastResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| ctx.invalid(Kind::Json, Kind::Float, "not a json number"))
}

pub fn to_string(value: &JsonValue, ctx: &CastContext<'_>) -> CastResult<String> {
    match value {
        JsonValue::String(text) => Ok(text.clone()),
        other => serde_json::to_string(other)
            .map_err(|_| ctx.invalid(Kind::Json, Kind::String, "unserializable json value")),
    }
}

/// A json number is an instant per the integer/float rules; nothing else
/// carries one.
pub fn to_timestamp(value: &JsonValue, ctx: &CastContext<'_>) -> CastResult<Timestamp> {
    if let Some(seconds) = value.as_i64() {
        return Ok(super::integer::to_timestamp(seconds));
    }
    if let Some(seconds) = value.as_f64() {
        return super::float::to_timestamp(seconds, ctx);
    }
    Err(ctx.invalid(Kind::Json, Kind::Timestamp, "not a json number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> CastContext<'static> {
        CastContext::new("doc")
    }

    #[test]
    fn test_unwrap_scalars() {
        assert!(to_boolean(&json!(true), &ctx()).unwrap());
        assert_eq!(to_integer(&json!(42), &ctx()).unwrap(), 42);
        assert_eq!(to_float(&json!(2.5), &ctx()).unwrap(), 2.5);
        assert_eq!(to_float(&json!(3), &ctx()).unwrap(), 3.0);
        assert_eq!(to_string(&json!("hi"), &ctx()).unwrap(), "hi");
    }

    #[test]
    fn test_mismatched_scalars_fail() {
        assert!(to_boolean(&json!(1), &ctx()).is_err());
        assert!(to_integer(&json!("42"), &ctx()).is_err());
        assert!(to_integer(&json!(1.5), &ctx()).is_err());
        assert!(to_float(&json!(null), &ctx()).is_err());
    }

    #[test]
    fn test_string_serializes_non_strings() {
        assert_eq!(
            to_string(&json!({"b": 1, "a": 2}), &ctx()).unwrap(),
            r#"{"b":1,"a":2}"#
        );
        assert_eq!(to_string(&json!([1, 2]), &ctx()).unwrap(), "[1,2]");
        assert_eq!(to_string(&json!(null), &ctx()).unwrap(), "null");
    }

    #[test]
    fn test_timestamp_from_numbers_only() {
        let ts = to_timestamp(&json!(1463084053), &ctx()).unwrap();
        assert_eq!(ts.epoch_second(), 1463084053);
        let ts = to_timestamp(&json!(0.5), &ctx()).unwrap();
        assert_eq!(ts.nanos(), 500_000_000);
        assert!(to_timestamp(&json!("2016-05-12"), &ctx()).is_err());
        assert!(to_timestamp(&json!({}), &ctx()).is_err());
    }
}
