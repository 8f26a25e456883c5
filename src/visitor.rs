//! Recursive path-matching walk over structured values.
//!
//! The visitor owns the compiled nested-path rules for an engine instance.
//! Visiting consumes the tree and returns a newly built one: matched nodes
//! are replaced by their cast result, everything else is reassembled in
//! original key/index order. No record-to-record state is carried.

use crate::cast::{self, CastContext};
use crate::error::CastResult;
use crate::path::PathExpression;
use crate::value::{Kind, Value};
use serde_json::{Map, Value as JsonValue};
use std::collections::{HashMap, HashSet};

/// Compiled nested-path rules, keyed by normalized path text.
#[derive(Debug, Default)]
pub struct JsonVisitor {
    rules: HashMap<String, Kind>,
    /// Proper prefixes of every registered path; descent stops outside them.
    prefixes: HashSet<String>,
}

impl JsonVisitor {
    pub(crate) fn new(rules: &[(PathExpression, Kind)]) -> Self {
        let mut compiled = HashMap::with_capacity(rules.len());
        let mut prefixes = HashSet::new();
        for (path, target) in rules {
            prefixes.extend(path.prefixes());
            compiled.insert(path.to_string(), *target);
        }
        Self {
            rules: compiled,
            prefixes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply all rules rooted at `root` to `value`.
    ///
    /// Registered paths missing from this particular document simply never
    /// match; that is not an error.
    pub fn visit(&self, root: &str, value: JsonValue) -> CastResult<JsonValue> {
        if self.rules.is_empty() {
            return Ok(value);
        }
        tracing::trace!(column = root, "visiting structured value");
        self.visit_node(root, value)
    }

    fn visit_node(&self, path: &str, value: JsonValue) -> CastResult<JsonValue> {
        if let Some(target) = self.rules.get(path) {
            // The rule result is final for this subtree; no further descent.
            return cast_node(path, value, *target);
        }
        if !self.prefixes.contains(path) {
            return Ok(value);
        }
        match value {
            JsonValue::Object(entries) => {
                let mut out = Map::with_capacity(entries.len());
                for (key, child) in entries {
                    let child_path = format!("{path}.{key}");
                    out.insert(key, self.visit_node(&child_path, child)?);
                }
                Ok(JsonValue::Object(out))
            }
            JsonValue::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, child) in items.into_iter().enumerate() {
                    let child_path = format!("{path}[{index}]");
                    out.push(self.visit_node(&child_path, child)?);
                }
                Ok(JsonValue::Array(out))
            }
            scalar => Ok(scalar),
        }
    }
}

/// Cast one matched node: unwrap the json scalar to its natural kind, run
/// the primitive matrix, wrap the result back into json. Null passes
/// through untouched.
fn cast_node(path: &str, value: JsonValue, target: Kind) -> CastResult<JsonValue> {
    if value.is_null() || target == Kind::Json {
        return Ok(value);
    }
    let ctx = CastContext::new(path);
    if target == Kind::Timestamp {
        return Err(ctx.unsupported(Kind::Json, Kind::Timestamp));
    }
    let natural = match value {
        JsonValue::Bool(flag) => Value::Boolean(flag),
        JsonValue::Number(number) => match number.as_i64() {
            Some(integer) => Value::Integer(integer),
            None => Value::Float(number.as_f64().ok_or_else(|| {
                ctx.invalid(Kind::Json, target, "number outside the representable range")
            })?),
        },
        JsonValue::String(text) => Value::String(text),
        JsonValue::Array(_) | JsonValue::Object(_) => Value::Json(value),
        JsonValue::Null => unreachable!("null is handled by the early return above"),
    };
    let source = natural.kind();
    match cast::apply(natural, target, &ctx)? {
        Value::Boolean(flag) => Ok(JsonValue::Bool(flag)),
        Value::Integer(integer) => Ok(JsonValue::Number(integer.into())),
        Value::Float(float) => serde_json::Number::from_f64(float)
            .map(JsonValue::Number)
            .ok_or_else(|| ctx.invalid(source, target, "not a finite number")),
        Value::String(text) => Ok(JsonValue::String(text)),
        Value::Json(tree) => Ok(tree),
        Value::Timestamp(_) => Err(ctx.unsupported(source, Kind::Timestamp)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CastError;
    use crate::path::{compile, CompiledName};
    use serde_json::json;

    fn visitor(rules: &[(&str, Kind)]) -> JsonVisitor {
        let compiled: Vec<(PathExpression, Kind)> = rules
            .iter()
            .map(|(name, target)| {
                let CompiledName::Path(path) = compile(name).unwrap() else {
                    panic!("expected path rule: {name}");
                };
                (path, *target)
            })
            .collect();
        JsonVisitor::new(&compiled)
    }

    #[test]
    fn test_nested_field_cast() {
        let v = visitor(&[("doc.user.age", Kind::Integer)]);
        let out = v.visit("doc", json!({"user": {"age": "42"}})).unwrap();
        assert_eq!(out, json!({"user": {"age": 42}}));
    }

    #[test]
    fn test_sibling_structure_untouched_and_ordered() {
        let v = visitor(&[("doc.user.age", Kind::Integer)]);
        let out = v
            .visit(
                "doc",
                json!({"z": true, "user": {"name": "ann", "age": "42"}, "a": 1}),
            )
            .unwrap();
        assert_eq!(
            serde_json::to_string(&out).unwrap(),
            r#"{"z":true,"user":{"name":"ann","age":42},"a":1}"#
        );
    }

    #[test]
    fn test_no_rules_preserves_key_order() {
        let v = visitor(&[]);
        let out = v.visit("doc", json!({"b": 1, "a": 2})).unwrap();
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"b":1,"a":2}"#);
    }

    #[test]
    fn test_array_index_path() {
        let v = visitor(&[("items[1].price", Kind::Float)]);
        let out = v
            .visit(
                "items",
                json!([{"price": "1.5"}, {"price": "2.5"}, {"price": "3.5"}]),
            )
            .unwrap();
        assert_eq!(
            out,
            json!([{"price": "1.5"}, {"price": 2.5}, {"price": "3.5"}])
        );
    }

    #[test]
    fn test_missing_path_is_not_an_error() {
        let v = visitor(&[("doc.user.age", Kind::Integer)]);
        let doc = json!({"other": {"shape": "entirely"}});
        assert_eq!(v.visit("doc", doc.clone()).unwrap(), doc);
    }

    #[test]
    fn test_idempotent_once_cast() {
        let v = visitor(&[("doc.user.age", Kind::Integer)]);
        let once = v.visit("doc", json!({"user": {"age": "42"}})).unwrap();
        let twice = v.visit("doc", once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_replaced_node_is_final() {
        // The matched subtree is serialized whole; the deeper rule under it
        // never fires on the replacement.
        let v = visitor(&[("doc.user", Kind::String), ("doc.user.age", Kind::Integer)]);
        let out = v.visit("doc", json!({"user": {"age": "42"}})).unwrap();
        assert_eq!(out, json!({"user": r#"{"age":"42"}"#}));
    }

    #[test]
    fn test_null_node_passes_through() {
        let v = visitor(&[("doc.user.age", Kind::Integer)]);
        let out = v.visit("doc", json!({"user": {"age": null}})).unwrap();
        assert_eq!(out, json!({"user": {"age": null}}));
    }

    #[test]
    fn test_unparsable_nested_value_fails() {
        let v = visitor(&[("doc.user.age", Kind::Integer)]);
        let err = v
            .visit("doc", json!({"user": {"age": "forty-two"}}))
            .unwrap_err();
        assert_eq!(err.column(), "doc.user.age");
        assert_eq!(err.kinds(), (Kind::String, Kind::Integer));
    }

    #[test]
    fn test_container_with_scalar_target_fails() {
        let v = visitor(&[("doc.user", Kind::Integer)]);
        let err = v.visit("doc", json!({"user": {"age": 1}})).unwrap_err();
        assert!(matches!(err, CastError::Invalid { .. }));
    }

    #[test]
    fn test_per_document_shapes_are_independent() {
        let v = visitor(&[("doc.user.age", Kind::Integer)]);
        assert_eq!(
            v.visit("doc", json!({"user": {"age": "1"}})).unwrap(),
            json!({"user": {"age": 1}})
        );
        assert_eq!(v.visit("doc", json!({"user": 7})).unwrap(), json!({"user": 7}));
        assert_eq!(v.visit("doc", json!("scalar")).unwrap(), json!("scalar"));
    }
}
