//! The cast dispatcher.
//!
//! [`CastEngine::bind`] resolves a schema pair and a rule list into
//! immutable state: per-column timestamp parsers and formatters, plus the
//! compiled nested-path rules feeding the visitor. Binding is the only
//! moment configuration can fail; after it, the engine only serves casts.
//!
//! Serving is one operation per source kind. Each call reads one value,
//! performs one cast (routing through the visitor when structured data is
//! involved) and writes exactly one value of the output column's declared
//! kind to the sink, or returns a [`CastError`].
//!
//! Rebinding to a new schema pair means building a new engine; resolved
//! state is never patched incrementally.

use crate::cast::{self, CastContext};
use crate::config::{CastDefaults, ColumnCastRule};
use crate::error::{CastResult, ConfigError, ConfigResult};
use crate::path::{self, CompiledName, PathExpression};
use crate::record::RecordSink;
use crate::schema::{Column, Schema};
use crate::timestamp::{TimestampFormatter, TimestampParser};
use crate::value::{Kind, Timestamp, Value};
use crate::visitor::JsonVisitor;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A bound casting engine: configured, resolved, immutable.
#[derive(Debug)]
pub struct CastEngine {
    input_schema: Schema,
    output_schema: Schema,
    parsers: HashMap<String, TimestampParser>,
    formatters: HashMap<String, TimestampFormatter>,
    visitor: JsonVisitor,
}

impl CastEngine {
    /// Resolve rules against a schema pair.
    ///
    /// Everything that can be rejected without seeing a record is rejected
    /// here: path syntax, unknown columns, duplicate rules, rules nesting
    /// into non-structured columns, nested timestamp targets, format and
    /// timezone strings, and output columns that disagree with what the
    /// rules (or identity pass-through) will produce.
    pub fn bind(
        input_schema: Schema,
        output_schema: Schema,
        rules: &[ColumnCastRule],
        defaults: &CastDefaults,
    ) -> ConfigResult<Self> {
        let mut parsers = HashMap::new();
        let mut formatters = HashMap::new();
        let mut path_rules: Vec<(PathExpression, Kind)> = Vec::new();
        let mut plain_targets: HashMap<String, Kind> = HashMap::new();
        let mut seen: HashSet<String> = HashSet::new();

        for rule in rules {
            match path::compile(&rule.name)? {
                CompiledName::Plain(name) => {
                    if !seen.insert(name.clone()) {
                        return Err(ConfigError::DuplicateRule(name));
                    }
                    let input = input_schema
                        .lookup(&name)
                        .ok_or_else(|| ConfigError::UnknownColumn(name.clone()))?;
                    if input.kind == Kind::String && rule.kind == Kind::Timestamp {
                        let parser = TimestampParser::new(
                            &name,
                            rule.format.as_deref().unwrap_or(&defaults.timestamp_format),
                            rule.timezone.as_deref().unwrap_or(&defaults.timezone),
                            rule.date.as_deref().unwrap_or(&defaults.date),
                        )?;
                        parsers.insert(name.clone(), parser);
                    }
                    if input.kind == Kind::Timestamp && rule.kind == Kind::String {
                        let formatter = TimestampFormatter::new(
                            &name,
                            rule.format.as_deref().unwrap_or(&defaults.timestamp_format),
                            rule.timezone.as_deref().unwrap_or(&defaults.timezone),
                        )?;
                        formatters.insert(name.clone(), formatter);
                    }
                    plain_targets.insert(name, rule.kind);
                }
                CompiledName::Path(path) => {
                    let normalized = path.to_string();
                    if !seen.insert(normalized.clone()) {
                        return Err(ConfigError::DuplicateRule(normalized));
                    }
                    let root = input_schema
                        .lookup(&path.root)
                        .ok_or_else(|| ConfigError::UnknownColumn(path.root.clone()))?;
                    if !matches!(root.kind, Kind::String | Kind::Json) {
                        return Err(ConfigError::PathIntoScalar {
                            column: path.root.clone(),
                            kind: root.kind,
                        });
                    }
                    if rule.kind == Kind::Timestamp {
                        return Err(ConfigError::PathTimestampTarget(normalized));
                    }
                    path_rules.push((path, rule.kind));
                }
            }
        }

        for column in output_schema.columns() {
            let input = input_schema
                .lookup(&column.name)
                .ok_or_else(|| ConfigError::UnknownColumn(column.name.clone()))?;
            let expected = plain_targets
                .get(&column.name)
                .copied()
                .unwrap_or(input.kind);
            if expected != column.kind {
                return Err(ConfigError::SchemaMismatch {
                    column: column.name.clone(),
                    declared: column.kind,
                    expected,
                });
            }
        }

        debug!(
            parsers = parsers.len(),
            formatters = formatters.len(),
            nested_rules = path_rules.len(),
            "cast engine bound"
        );

        Ok(Self {
            input_schema,
            output_schema,
            parsers,
            formatters,
            visitor: JsonVisitor::new(&path_rules),
        })
    }

    pub fn input_schema(&self) -> &Schema {
        &self.input_schema
    }

    pub fn output_schema(&self) -> &Schema {
        &self.output_schema
    }

    pub fn cast_from_boolean(
        &self,
        column: &Column,
        value: bool,
        sink: &mut dyn RecordSink,
    ) -> CastResult<()> {
        self.emit(column, Value::Boolean(value), sink)
    }

    pub fn cast_from_integer(
        &self,
        column: &Column,
        value: i64,
        sink: &mut dyn RecordSink,
    ) -> CastResult<()> {
        self.emit(column, Value::Integer(value), sink)
    }

    pub fn cast_from_float(
        &self,
        column: &Column,
        value: f64,
        sink: &mut dyn RecordSink,
    ) -> CastResult<()> {
        self.emit(column, Value::Float(value), sink)
    }

    pub fn cast_from_string(
        &self,
        column: &Column,
        value: &str,
        sink: &mut dyn RecordSink,
    ) -> CastResult<()> {
        self.emit(column, Value::String(value.to_string()), sink)
    }

    pub fn cast_from_timestamp(
        &self,
        column: &Column,
        value: Timestamp,
        sink: &mut dyn RecordSink,
    ) -> CastResult<()> {
        self.emit(column, Value::Timestamp(value), sink)
    }

    pub fn cast_from_json(
        &self,
        column: &Column,
        value: serde_json::Value,
        sink: &mut dyn RecordSink,
    ) -> CastResult<()> {
        self.emit(column, Value::Json(value), sink)
    }

    /// Dispatch on the value's runtime kind.
    pub fn cast_value(
        &self,
        column: &Column,
        value: Value,
        sink: &mut dyn RecordSink,
    ) -> CastResult<()> {
        self.emit(column, value, sink)
    }

    /// Perform one cast and write the result.
    ///
    /// Structured data routes through the visitor: a json value is visited
    /// before the outer cast, and text parsed for a json target is visited
    /// after parsing.
    fn emit(&self, column: &Column, value: Value, sink: &mut dyn RecordSink) -> CastResult<()> {
        let ctx = CastContext::new(&column.name)
            .with_parser(self.parsers.get(&column.name))
            .with_formatter(self.formatters.get(&column.name));
        let out = match (value, column.kind) {
            (Value::Json(tree), target) => {
                let visited = self.visitor.visit(&column.name, tree)?;
                cast::apply(Value::Json(visited), target, &ctx)?
            }
            (Value::String(text), Kind::Json) => {
                let tree = cast::string::to_json(&text, &ctx)?;
                Value::Json(self.visitor.visit(&column.name, tree)?)
            }
            (value, target) => cast::apply(value, target, &ctx)?,
        };
        match out {
            Value::Boolean(v) => sink.set_boolean(column, v),
            Value::Integer(v) => sink.set_integer(column, v),
            Value::Float(v) => sink.set_float(column, v),
            Value::String(v) => sink.set_string(column, v),
            Value::Timestamp(v) => sink.set_timestamp(column, v),
            Value::Json(v) => sink.set_json(column, v),
        }
        Ok(())
    }
}

/// Retype the input schema per the rule list: each non-path rule's column
/// takes the rule's target kind, everything else keeps its input kind.
pub fn derive_output_schema(
    input_schema: &Schema,
    rules: &[ColumnCastRule],
) -> ConfigResult<Schema> {
    let mut targets: HashMap<String, Kind> = HashMap::new();
    for rule in rules {
        match path::compile(&rule.name)? {
            CompiledName::Plain(name) => {
                if input_schema.lookup(&name).is_none() {
                    return Err(ConfigError::UnknownColumn(name));
                }
                if targets.insert(name.clone(), rule.kind).is_some() {
                    return Err(ConfigError::DuplicateRule(name));
                }
            }
            CompiledName::Path(path) => {
                if input_schema.lookup(&path.root).is_none() {
                    return Err(ConfigError::UnknownColumn(path.root));
                }
            }
        }
    }
    Schema::new(
        input_schema
            .columns()
            .iter()
            .map(|column| {
                let kind = targets.get(&column.name).copied().unwrap_or(column.kind);
                Column::new(column.name.clone(), kind)
            })
            .collect(),
    )
}
