//! Schema preparation error types
//!
//! Error codes (all FATAL: a failed preparation leaves no usable registry):
//! - HQL_MALFORMED_CONFIG
//! - HQL_UNKNOWN_TABLE
//! - HQL_UNKNOWN_TYPE
//! - HQL_UNKNOWN_FIELD
//! - HQL_DUPLICATE_QUERY
//! - HQL_UNKNOWN_JOIN
//! - HQL_UNBOUNDED_STATE_QUERY
//! - HQL_UNPOSITIONED_FIELD
//! - HQL_UNSUPPORTED_KEY_TYPE

use std::fmt;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The registry cannot be built; the process must not serve queries
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Config file unreadable or not valid JSON
    MalformedConfig,
    /// Table name has no short tag
    UnknownTable,
    /// Field type name not in the type registry
    UnknownType,
    /// Key or join references an undeclared field
    UnknownField,
    /// Two queries share a name
    DuplicateQuery,
    /// Join names a missing query, or one targeting another table
    UnknownJoin,
    /// State-table lookup with no caller-supplied block bound
    UnboundedStateQuery,
    /// Field read from row bytes lies after a variable-size field
    UnpositionedField,
    /// Range key field type cannot be order-encoded
    UnsupportedKeyType,
}

impl SchemaErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::MalformedConfig => "HQL_MALFORMED_CONFIG",
            SchemaErrorCode::UnknownTable => "HQL_UNKNOWN_TABLE",
            SchemaErrorCode::UnknownType => "HQL_UNKNOWN_TYPE",
            SchemaErrorCode::UnknownField => "HQL_UNKNOWN_FIELD",
            SchemaErrorCode::DuplicateQuery => "HQL_DUPLICATE_QUERY",
            SchemaErrorCode::UnknownJoin => "HQL_UNKNOWN_JOIN",
            SchemaErrorCode::UnboundedStateQuery => "HQL_UNBOUNDED_STATE_QUERY",
            SchemaErrorCode::UnpositionedField => "HQL_UNPOSITIONED_FIELD",
            SchemaErrorCode::UnsupportedKeyType => "HQL_UNSUPPORTED_KEY_TYPE",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error with the table or query it concerns
#[derive(Debug, Clone)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    table: Option<String>,
    query: Option<String>,
}

impl SchemaError {
    fn new(code: SchemaErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            table: None,
            query: None,
        }
    }

    fn for_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    fn for_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn malformed_config(source: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::new(
            SchemaErrorCode::MalformedConfig,
            format!("Malformed query config '{}': {}", source.into(), reason),
        )
    }

    pub fn unknown_table(table: impl Into<String>) -> Self {
        let table = table.into();
        Self::new(
            SchemaErrorCode::UnknownTable,
            format!("query_database: unknown table: {}", table),
        )
        .for_table(table)
    }

    pub fn unknown_type(table: impl Into<String>, field: &str, type_name: &str) -> Self {
        let table = table.into();
        Self::new(
            SchemaErrorCode::UnknownType,
            format!("Field '{}.{}' has unknown type '{}'", table, field, type_name),
        )
        .for_table(table)
    }

    pub fn unknown_field(table: impl Into<String>, field: &str) -> Self {
        let table = table.into();
        Self::new(
            SchemaErrorCode::UnknownField,
            format!("Table '{}' has no field '{}'", table, field),
        )
        .for_table(table)
    }

    pub fn duplicate_query(query: impl Into<String>) -> Self {
        let query = query.into();
        Self::new(
            SchemaErrorCode::DuplicateQuery,
            format!("Query '{}' is defined more than once", query),
        )
        .for_query(query)
    }

    pub fn unknown_join(query: impl Into<String>, reason: impl Into<String>) -> Self {
        let query = query.into();
        Self::new(
            SchemaErrorCode::UnknownJoin,
            format!("Query '{}' has an invalid join: {}", query, reason.into()),
        )
        .for_query(query)
    }

    pub fn unbounded_state_query(query: impl Into<String>, target: &str) -> Self {
        let query = query.into();
        Self::new(
            SchemaErrorCode::UnboundedStateQuery,
            format!(
                "Query '{}' reads state table '{}' but does not set limit_block_num",
                query, target
            ),
        )
        .for_query(query)
    }

    pub fn unpositioned_field(query: impl Into<String>, table: &str, field: &str) -> Self {
        let query = query.into();
        Self::new(
            SchemaErrorCode::UnpositionedField,
            format!(
                "Query '{}' reads '{}.{}', which follows a variable-size field",
                query, table, field
            ),
        )
        .for_query(query)
        .for_table(table)
    }

    pub fn unsupported_key_type(query: impl Into<String>, field: &str, type_name: &str) -> Self {
        let query = query.into();
        Self::new(
            SchemaErrorCode::UnsupportedKeyType,
            format!(
                "Query '{}' uses '{}' of type '{}' as a key",
                query, field, type_name
            ),
        )
        .for_query(query)
    }

    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
