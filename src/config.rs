//! Cast rule configuration.
//!
//! A host declares one [`ColumnCastRule`] per column that needs a cast;
//! columns without a rule pass through unchanged. Rules are plain serde
//! data so a host can feed them straight from a JSON configuration file.

use crate::value::Kind;
use serde::{Deserialize, Serialize};

/// Per-column cast declaration.
///
/// `name` is either a plain column name or a path into a structured column
/// (`doc.user.age`, `items[0].price`). The optional timestamp fields fall
/// back to [`CastDefaults`] when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnCastRule {
    /// Column identifier, possibly a path expression.
    pub name: String,

    /// Declared target kind.
    #[serde(rename = "type")]
    pub kind: Kind,

    /// Timestamp format override (strftime syntax).
    #[serde(default)]
    pub format: Option<String>,

    /// Timezone override (`UTC` or a fixed offset such as `+09:00`).
    #[serde(default)]
    pub timezone: Option<String>,

    /// Default date for time-only formats (`YYYY-MM-DD`).
    #[serde(default)]
    pub date: Option<String>,
}

impl ColumnCastRule {
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
            format: None,
            timezone: None,
            date: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// Engine-wide fallbacks for rule fields left unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastDefaults {
    /// Timestamp format used when a rule has none.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Timezone used when a rule has none.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Date filled in when a parsed format carries no date fields.
    #[serde(default = "default_date")]
    pub date: String,
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S.%N %z".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_date() -> String {
    "1970-01-01".to_string()
}

impl Default for CastDefaults {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            timezone: default_timezone(),
            date: default_date(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_from_json() {
        let rule: ColumnCastRule = serde_json::from_str(
            r#"{"name": "ts", "type": "timestamp", "format": "%Y-%m-%d %H:%M:%S.%6N", "timezone": "UTC"}"#,
        )
        .unwrap();
        assert_eq!(rule.kind, Kind::Timestamp);
        assert_eq!(rule.format.as_deref(), Some("%Y-%m-%d %H:%M:%S.%6N"));
        assert_eq!(rule.date, None);
    }

    #[test]
    fn test_rule_list_from_json() {
        let rules: Vec<ColumnCastRule> = serde_json::from_str(
            r#"[
                {"name": "flag", "type": "string"},
                {"name": "doc.user.age", "type": "integer"}
            ]"#,
        )
        .unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].name, "doc.user.age");
        assert_eq!(rules[1].kind, Kind::Integer);
    }

    #[test]
    fn test_defaults() {
        let defaults = CastDefaults::default();
        assert_eq!(defaults.timezone, "UTC");
        assert_eq!(defaults.date, "1970-01-01");
        assert!(defaults.timestamp_format.contains("%N"));
    }

    #[test]
    fn test_defaults_from_empty_json() {
        let defaults: CastDefaults = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, CastDefaults::default());
    }
}
