//! # Recast - record-level type casting for columnar pipelines
//!
//! Recast rewrites record fields from one primitive kind to another
//! according to a per-column rule set, including fields nested inside
//! structured (json) columns addressed by path expressions.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Input field │────▶│  CastEngine  │────▶│  RecordSink  │
//! │  (host read) │     │ matrix+paths │     │ (host write) │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! The host pipeline owns record I/O and configuration loading; the engine
//! consumes a resolved rule list plus a bound schema pair and serves
//! synchronous casts. Binding builds all resolved state (timestamp parsers
//! and formatters, compiled path rules) once; a bound engine is immutable
//! and shareable across threads.
//!
//! ## Quick Start
//!
//! ```rust
//! use recast::{
//!     CastDefaults, CastEngine, Column, ColumnCastRule, Kind, Record, Schema,
//!     derive_output_schema,
//! };
//!
//! let input = Schema::new(vec![Column::new("age", Kind::String)]).unwrap();
//! let rules = vec![ColumnCastRule::new("age", Kind::Integer)];
//! let output = derive_output_schema(&input, &rules).unwrap();
//! let engine =
//!     CastEngine::bind(input, output.clone(), &rules, &CastDefaults::default()).unwrap();
//!
//! let column = output.lookup("age").unwrap().clone();
//! let mut record = Record::new(output);
//! engine.cast_from_string(&column, "42", &mut record).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`error`] - configuration and cast error types
//! - [`value`] - the six value kinds and the timestamp representation
//! - [`schema`] - columns and ordered schemas
//! - [`config`] - cast rules and engine-wide defaults
//! - [`path`] - column identifier compilation
//! - [`cast`] - the pairwise primitive cast matrix
//! - [`visitor`] - recursive path-matching walk over json trees
//! - [`timestamp`] - compiled timestamp parsers and formatters
//! - [`record`] - the record-builder contract
//! - [`engine`] - bind and dispatch

pub mod cast;
pub mod config;
pub mod engine;
pub mod error;
pub mod path;
pub mod record;
pub mod schema;
pub mod timestamp;
pub mod value;
pub mod visitor;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{CastError, CastResult, ConfigError, ConfigResult};

// =============================================================================
// Re-exports - Data model
// =============================================================================

pub use schema::{Column, Schema};
pub use value::{Kind, Timestamp, Value};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{CastDefaults, ColumnCastRule};
pub use path::{CompiledName, PathExpression, Segment};

// =============================================================================
// Re-exports - Engine
// =============================================================================

pub use cast::CastContext;
pub use engine::{derive_output_schema, CastEngine};
pub use record::{Record, RecordSink};
pub use timestamp::{TimestampFormatter, TimestampParser};
pub use visitor::JsonVisitor;
