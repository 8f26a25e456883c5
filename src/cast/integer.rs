//! Casts from 64-bit integer sources.

use crate::value::Timestamp;

/// Zero is false, every other value is true.
pub fn to_boolean(value: i64) -> bool {
    value != 0
}

pub fn to_float(value: i64) -> f64 {
    value as f64
}

pub fn to_string(value: i64) -> String {
    value.to_string()
}

/// The integer is an epoch-seconds instant.
pub fn to_timestamp(value: i64) -> Timestamp {
    Timestamp::from_epoch_second(value)
}

pub fn to_json(value: i64) -> serde_json::Value {
    serde_json::Value::Number(value.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_is_nonzero() {
        assert!(to_boolean(1));
        assert!(to_boolean(-42));
        assert!(!to_boolean(0));
    }

    #[test]
    fn test_timestamp_is_epoch_seconds() {
        let ts = to_timestamp(1463084053);
        assert_eq!(ts.epoch_second(), 1463084053);
        assert_eq!(ts.nanos(), 0);
    }

    #[test]
    fn test_text_and_json() {
        assert_eq!(to_string(-5), "-5");
        assert_eq!(to_json(7), serde_json::json!(7));
    }
}
