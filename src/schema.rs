//! Column and schema definitions.
//!
//! A [`Schema`] is an ordered sequence of uniquely-named [`Column`]s. Order
//! matters for record layout; casting semantics only ever address columns by
//! name. Schemas are constructed at configuration time and never mutated.

use crate::error::{ConfigError, ConfigResult};
use crate::value::Kind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Kind,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self { name: name.into(), kind }
    }
}

/// An ordered set of columns with by-name lookup.
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema, rejecting duplicate column names.
    pub fn new(columns: Vec<Column>) -> ConfigResult<Self> {
        let mut index = HashMap::with_capacity(columns.len());
        for (pos, column) in columns.iter().enumerate() {
            if index.insert(column.name.clone(), pos).is_some() {
                return Err(ConfigError::DuplicateColumn(column.name.clone()));
            }
        }
        Ok(Self { columns, index })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column by name.
    pub fn lookup(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&pos| &self.columns[pos])
    }

    /// Positional index of a column, for record layout.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}
