//! Casts from string sources.
//!
//! Timestamp parsing requires the pre-resolved per-column parser from the
//! bind step; the other conversions are plain text parses.

use super::CastContext;
use crate::error::CastResult;
use crate::value::{Kind, Timestamp};

/// Accepts exactly `"true"` and `"false"`.
pub fn to_boolean(value: &str, ctx: &CastContext<'_>) -> CastResult<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ctx.invalid(Kind::String, Kind::Boolean, "not a boolean literal")),
    }
}

pub fn to_integer(value: &str, ctx: &CastContext<'_>) -> CastResult<i64> {
    value
        .parse::<i64>()
        .map_err(|_| ctx.invalid(Kind::String, Kind::Integer, "not an integer"))
}

pub fn to_float(value: &str, ctx: &CastContext<'_>) -> CastResult<f64> {
    value
        .parse::<f64>()
        .map_err(|_| ctx.invalid(Kind::String, Kind::Float, "not a number"))
}

pub fn to_timestamp(value: &str, ctx: &CastContext<'_>) -> CastResult<Timestamp> {
    match ctx.parser() {
        Some(parser) => parser.parse(value),
        None => Err(ctx.invalid(
            Kind::String,
            Kind::Timestamp,
            "no timestamp parser bound for this column",
        )),
    }
}

pub fn to_json(value: &str, ctx: &CastContext<'_>) -> CastResult<serde_json::Value> {
    serde_json::from_str(value)
        .map_err(|_| ctx.invalid(Kind::String, Kind::Json, "not valid json text"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::TimestampParser;

    fn ctx() -> CastContext<'static> {
        CastContext::new("col")
    }

    #[test]
    fn test_boolean_literals_only() {
        assert!(to_boolean("true", &ctx()).unwrap());
        assert!(!to_boolean("false", &ctx()).unwrap());
        for bad in ["True", "yes", "1", " true", ""] {
            assert!(to_boolean(bad, &ctx()).is_err(), "expected failure for {bad:?}");
        }
    }

    #[test]
    fn test_numeric_parses() {
        assert_eq!(to_integer("-12", &ctx()).unwrap(), -12);
        assert!(to_integer("12.5", &ctx()).is_err());
        assert_eq!(to_float("2.5", &ctx()).unwrap(), 2.5);
        assert!(to_float("two", &ctx()).is_err());
    }

    #[test]
    fn test_timestamp_uses_bound_parser() {
        let parser =
            TimestampParser::new("ts", "%Y-%m-%d %H:%M:%S.%6N", "UTC", "1970-01-01").unwrap();
        let ctx = CastContext::new("ts").with_parser(Some(&parser));
        let ts = to_timestamp("2016-05-12 20:14:13.500000", &ctx).unwrap();
        assert_eq!(ts.epoch_second(), 1463084053);
        assert_eq!(ts.nanos(), 500_000_000);
    }

    #[test]
    fn test_timestamp_without_parser_fails() {
        assert!(to_timestamp("2016-05-12", &ctx()).is_err());
    }

    #[test]
    fn test_json_parse() {
        assert_eq!(
            to_json(r#"{"a": 1}"#, &ctx()).unwrap(),
            serde_json::json!({"a": 1})
        );
        assert!(to_json("{broken", &ctx()).is_err());
    }
}
