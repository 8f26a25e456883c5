//! The record-builder contract and an in-memory implementation.
//!
//! The engine does not own record I/O. Each successful cast hands exactly
//! one value of the output column's declared kind to a [`RecordSink`]; what
//! the sink does with it (page building, buffering, serialization) is the
//! host's business. [`Record`] is a schema-ordered in-memory sink for hosts
//! that want one, and for tests.

use crate::schema::{Column, Schema};
use crate::value::{Timestamp, Value};

/// Destination for cast results, one setter per kind.
pub trait RecordSink {
    fn set_boolean(&mut self, column: &Column, value: bool);
    fn set_integer(&mut self, column: &Column, value: i64);
    fn set_float(&mut self, column: &Column, value: f64);
    fn set_string(&mut self, column: &Column, value: String);
    fn set_timestamp(&mut self, column: &Column, value: Timestamp);
    fn set_json(&mut self, column: &Column, value: serde_json::Value);
}

/// A single materialized record laid out in schema order. Unset fields
/// read as `None`.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Schema,
    values: Vec<Option<Value>>,
}

impl Record {
    pub fn new(schema: Schema) -> Self {
        let values = vec![None; schema.len()];
        Self { schema, values }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema
            .position(name)
            .and_then(|pos| self.values[pos].as_ref())
    }

    pub fn set(&mut self, name: &str, value: Value) {
        if let Some(pos) = self.schema.position(name) {
            self.values[pos] = Some(value);
        }
    }

    /// Field values in schema order.
    pub fn values(&self) -> &[Option<Value>] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Option<Value>> {
        self.values
    }

    fn put(&mut self, column: &Column, value: Value) {
        if let Some(pos) = self.schema.position(&column.name) {
            self.values[pos] = Some(value);
        }
    }
}

impl RecordSink for Record {
    fn set_boolean(&mut self, column: &Column, value: bool) {
        self.put(column, Value::Boolean(value));
    }

    fn set_integer(&mut self, column: &Column, value: i64) {
        self.put(column, Value::Integer(value));
    }

    fn set_float(&mut self, column: &Column, value: f64) {
        self.put(column, Value::Float(value));
    }

    fn set_string(&mut self, column: &Column, value: String) {
        self.put(column, Value::String(value));
    }

    fn set_timestamp(&mut self, column: &Column, value: Timestamp) {
        self.put(column, Value::Timestamp(value));
    }

    fn set_json(&mut self, column: &Column, value: serde_json::Value) {
        self.put(column, Value::Json(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;

    fn schema() -> Schema {
        Schema::new(vec![
            Column::new("id", Kind::Integer),
            Column::new("name", Kind::String),
        ])
        .unwrap()
    }

    #[test]
    fn test_sink_writes_by_position() {
        let schema = schema();
        let mut record = Record::new(schema.clone());
        let id = schema.lookup("id").unwrap().clone();
        let name = schema.lookup("name").unwrap().clone();
        record.set_string(&name, "ann".into());
        record.set_integer(&id, 7);
        assert_eq!(record.values()[0], Some(Value::Integer(7)));
        assert_eq!(record.values()[1], Some(Value::String("ann".into())));
    }

    #[test]
    fn test_unset_fields_read_none() {
        let record = Record::new(schema());
        assert!(record.get("id").is_none());
        assert!(record.get("nonexistent").is_none());
    }
}
