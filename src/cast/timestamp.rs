//! Casts from timestamp sources.

use super::CastContext;
use crate::error::CastResult;
use crate::value::{Kind, Timestamp};

pub fn to_boolean(_value: Timestamp, ctx: &CastContext<'_>) -> CastResult<bool> {
    Err(ctx.unsupported(Kind::Timestamp, Kind::Boolean))
}

/// Epoch seconds; the nanosecond fraction is dropped.
pub fn to_integer(value: Timestamp) -> i64 {
    value.epoch_second()
}

/// Epoch seconds plus the fraction.
pub fn to_float(value: Timestamp) -> f64 {
    value.epoch_second() as f64 + value.nanos() as f64 / 1e9
}

pub fn to_string(value: Timestamp, ctx: &CastContext<'_>) -> CastResult<String> {
    match ctx.formatter() {
        Some(formatter) => formatter.format(value),
        None => Err(ctx.invalid(
            Kind::Timestamp,
            Kind::String,
            "no timestamp formatter bound for this column",
        )),
    }
}

pub fn to_json(_value: Timestamp, ctx: &CastContext<'_>) -> CastResult<serde_json::Value> {
    Err(ctx.unsupported(Kind::Timestamp, Kind::Json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::TimestampFormatter;

    fn instant() -> Timestamp {
        Timestamp::new(1463084053, 500_000_000)
    }

    #[test]
    fn test_boolean_and_json_always_fail() {
        let ctx = CastContext::new("ts");
        assert!(to_boolean(instant(), &ctx).is_err());
        assert!(to_json(instant(), &ctx).is_err());
    }

    #[test]
    fn test_integer_drops_fraction() {
        assert_eq!(to_integer(instant()), 1463084053);
    }

    #[test]
    fn test_float_keeps_fraction() {
        assert_eq!(to_float(instant()), 1463084053.5);
    }

    #[test]
    fn test_string_uses_bound_formatter() {
        let formatter = TimestampFormatter::new("ts", "%Y-%m-%d %H:%M:%S.%6N", "UTC").unwrap();
        let ctx = CastContext::new("ts").with_formatter(Some(&formatter));
        assert_eq!(
            to_string(instant(), &ctx).unwrap(),
            "2016-05-12 20:14:13.500000"
        );
    }

    #[test]
    fn test_string_without_formatter_fails() {
        assert!(to_string(instant(), &CastContext::new("ts")).is_err());
    }
}
