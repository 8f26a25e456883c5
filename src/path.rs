//! Column identifier compilation.
//!
//! A cast rule's `name` is either a whole column or a location nested inside
//! a structured column. A bare identifier addresses the column; anything with
//! structural syntax (`doc.user.age`, `items[0].price`, optionally prefixed
//! with the legacy `$.` root marker) compiles into a [`PathExpression`].
//! Compilation is syntax validation only and never touches a value, so
//! malformed paths fail at bind time rather than per record.

use crate::error::{ConfigError, ConfigResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

/// One step of a path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// A compiled path into a structured column: root column name plus the
/// segments leading to the addressed node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathExpression {
    pub root: String,
    pub segments: Vec<Segment>,
}

impl fmt::Display for PathExpression {
    /// Normalized form: `root.a[0].b`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for segment in &self.segments {
            match segment {
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// A compiled rule identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledName {
    /// Addresses a whole column.
    Plain(String),
    /// Addresses a node inside a structured column.
    Path(PathExpression),
}

/// Classify and compile a rule identifier.
///
/// A root-only identifier addresses the whole column even when written with
/// the legacy `$.` marker, so `$.doc` and `doc` compile identically.
pub fn compile(name: &str) -> ConfigResult<CompiledName> {
    let body = name.strip_prefix("$.").unwrap_or(name);
    if IDENTIFIER.is_match(body) {
        return Ok(CompiledName::Plain(body.to_string()));
    }
    parse_path(name).map(CompiledName::Path)
}

fn parse_path(name: &str) -> ConfigResult<PathExpression> {
    let err = |message: &str| ConfigError::InvalidPath {
        name: name.to_string(),
        message: message.to_string(),
    };

    let body = name.strip_prefix("$.").unwrap_or(name);
    let bytes = body.as_bytes();
    let mut pos = 0;

    let root = read_identifier(bytes, &mut pos);
    if root.is_empty() {
        return Err(err("missing root column name"));
    }

    let mut segments = Vec::new();
    while pos < bytes.len() {
        match bytes[pos] {
            b'.' => {
                pos += 1;
                let key = read_identifier(bytes, &mut pos);
                if key.is_empty() {
                    return Err(err("empty field segment"));
                }
                segments.push(Segment::Key(key));
            }
            b'[' => {
                pos += 1;
                let start = pos;
                while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                    pos += 1;
                }
                if pos == start {
                    return Err(err("bracket index must be a non-negative integer"));
                }
                if pos >= bytes.len() || bytes[pos] != b']' {
                    return Err(err("unclosed bracket index"));
                }
                let index: usize = body[start..pos]
                    .parse()
                    .map_err(|_| err("bracket index out of range"))?;
                pos += 1;
                segments.push(Segment::Index(index));
            }
            _ => return Err(err("unexpected character in path")),
        }
    }

    if segments.is_empty() {
        return Err(err("path has no segments beyond the root"));
    }

    Ok(PathExpression { root, segments })
}

fn read_identifier(bytes: &[u8], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < bytes.len() {
        let b = bytes[*pos];
        let valid_start = b.is_ascii_alphabetic() || b == b'_';
        let valid_continue = valid_start || b.is_ascii_digit();
        if (*pos == start && !valid_start) || (*pos > start && !valid_continue) {
            break;
        }
        *pos += 1;
    }
    String::from_utf8_lossy(&bytes[start..*pos]).into_owned()
}

impl PathExpression {
    /// Normalized text forms of every proper prefix of this path, shortest
    /// first: `doc`, `doc.user` for `doc.user.age`. The visitor uses these
    /// to decide which subtrees are worth descending into.
    pub(crate) fn prefixes(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.segments.len());
        let mut current = self.root.clone();
        out.push(current.clone());
        for segment in &self.segments[..self.segments.len() - 1] {
            match segment {
                Segment::Key(key) => {
                    current.push('.');
                    current.push_str(key);
                }
                Segment::Index(index) => {
                    current.push('[');
                    current.push_str(&index.to_string());
                    current.push(']');
                }
            }
            out.push(current.clone());
        }
        out
    }
}
