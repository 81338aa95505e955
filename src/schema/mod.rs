//! Schema Registry subsystem
//!
//! Table, field, key and query definitions are read from a declarative
//! query config and prepared exactly once into an immutable [`Registry`].
//!
//! # Preparation
//!
//! 1. Resolve each table name to its short tag (unknown names are fatal)
//! 2. Assign field byte offsets by running sum of fixed sizes, stopping
//!    after the first variable-size field
//! 3. Bind each query to its table, range-key codecs, flags, result cap and
//!    optional join

mod errors;
mod loader;
mod registry;
mod tables;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use registry::{Field, Join, Query, Registry, Table};
pub use tables::{known_tables, table_tag};
pub use types::{FieldDef, KeyDef, QueryConfig, QueryDef, TableDef};
