//! Casts from 64-bit float sources.

use super::CastContext;
use crate::error::CastResult;
use crate::value::{Kind, Timestamp};

/// Zero is false, every other value (including NaN) is true.
pub fn to_boolean(value: f64) -> bool {
    value != 0.0
}

/// Truncates toward zero. Non-finite values and values outside the i64
/// range have no integer counterpart.
pub fn to_integer(value: f64, ctx: &CastContext<'_>) -> CastResult<i64> {
    if !value.is_finite() {
        return Err(ctx.invalid(Kind::Float, Kind::Integer, "not a finite number"));
    }
    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(ctx.invalid(Kind::Float, Kind::Integer, "out of integer range"));
    }
    Ok(truncated as i64)
}

pub fn to_string(value: f64) -> String {
    value.to_string()
}

/// Seconds with fraction. The scaled nanosecond total is decomposed with
/// euclidean division so negative instants keep a fraction in `[0, 1e9)`.
pub fn to_timestamp(value: f64, ctx: &CastContext<'_>) -> CastResult<Timestamp> {
    if !value.is_finite() {
        return Err(ctx.invalid(Kind::Float, Kind::Timestamp, "not a finite number"));
    }
    let total_nanos = (value * 1e9).round();
    if total_nanos < i64::MIN as f64 || total_nanos >= i64::MAX as f64 {
        return Err(ctx.invalid(Kind::Float, Kind::Timestamp, "out of instant range"));
    }
    let total_nanos = total_nanos as i64;
    let seconds = total_nanos.div_euclid(1_000_000_000);
    let nanos = total_nanos.rem_euclid(1_000_000_000) as u32;
    Ok(Timestamp::new(seconds, nanos))
}

pub fn to_json(value: f64, ctx: &CastContext<'_>) -> CastResult<serde_json::Value> {
    serde_json::Number::from_f64(value)
        .map(serde_json::Value::Number)
        .ok_or_else(|| ctx.invalid(Kind::Float, Kind::Json, "not a finite number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> CastContext<'static> {
        CastContext::new("col")
    }

    #[test]
    fn test_integer_truncates_toward_zero() {
        assert_eq!(to_integer(1.9, &ctx()).unwrap(), 1);
        assert_eq!(to_integer(-1.9, &ctx()).unwrap(), -1);
        assert_eq!(to_integer(0.0, &ctx()).unwrap(), 0);
    }

    #[test]
    fn test_integer_rejects_non_finite() {
        assert!(to_integer(f64::NAN, &ctx()).is_err());
        assert!(to_integer(f64::INFINITY, &ctx()).is_err());
        assert!(to_integer(f64::NEG_INFINITY, &ctx()).is_err());
    }

    #[test]
    fn test_timestamp_keeps_fraction() {
        let ts = to_timestamp(1463084053.5, &ctx()).unwrap();
        assert_eq!(ts.epoch_second(), 1463084053);
        assert_eq!(ts.nanos(), 500_000_000);
    }

    #[test]
    fn test_timestamp_negative_instant_normalized() {
        let ts = to_timestamp(-0.5, &ctx()).unwrap();
        assert_eq!(ts.epoch_second(), -1);
        assert_eq!(ts.nanos(), 500_000_000);
    }

    #[test]
    fn test_boolean() {
        assert!(to_boolean(0.1));
        assert!(to_boolean(-3.0));
        assert!(!to_boolean(0.0));
    }

    #[test]
    fn test_json_rejects_nan() {
        assert!(to_json(f64::NAN, &ctx()).is_err());
        assert_eq!(to_json(2.5, &ctx()).unwrap(), serde_json::json!(2.5));
    }
}
