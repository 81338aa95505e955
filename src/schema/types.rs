//! Declarative query config
//!
//! The external schema source: tables with their ordered fields, and named
//! queries over those tables. Everything here is plain data; resolution
//! happens in [`super::Registry::prepare`].

use serde::{Deserialize, Serialize};

/// A column of a table's fixed-layout row encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    /// Declared type name, resolved through the type registry
    #[serde(rename = "type")]
    pub type_name: String,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Reference to a field by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDef {
    pub name: String,
}

impl KeyDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    /// Primary key fields
    #[serde(default)]
    pub keys: Vec<KeyDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDef {
    /// Query name; also the index tag under the target table
    pub name: String,
    pub table: String,
    /// Target is a state table with per-block presence
    #[serde(default)]
    pub is_state: bool,
    /// Caller supplies a block bound ahead of the range arguments
    #[serde(default)]
    pub limit_block_num: bool,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Non-range argument type names
    #[serde(default)]
    pub args: Vec<String>,
    /// Index fields of the target table, in key order
    #[serde(default)]
    pub range_keys: Vec<KeyDef>,
    #[serde(default)]
    pub join_table: Option<String>,
    /// Query whose index the join searches
    #[serde(default)]
    pub join_query: Option<String>,
    /// Fields of the matched row that form the join lookup key
    #[serde(default)]
    pub join_key_values: Vec<KeyDef>,
    /// Fields of the joined row appended to the result
    #[serde(default)]
    pub fields_from_join: Vec<KeyDef>,
}

fn default_max_results() -> u32 {
    100
}

impl QueryDef {
    /// Query over `table` with defaults for every optional setting
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            is_state: false,
            limit_block_num: false,
            max_results: default_max_results(),
            args: Vec::new(),
            range_keys: Vec::new(),
            join_table: None,
            join_query: None,
            join_key_values: Vec::new(),
            fields_from_join: Vec::new(),
        }
    }
}

/// Complete query config: the schema source consumed once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default)]
    pub tables: Vec<TableDef>,
    #[serde(default)]
    pub queries: Vec<QueryDef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let q: QueryDef = serde_json::from_str(r#"{"name":"account","table":"account"}"#).unwrap();
        assert_eq!(q, QueryDef::new("account", "account"));
        assert_eq!(q.max_results, 100);
        assert!(q.join_table.is_none());
    }

    #[test]
    fn test_field_type_key() {
        let f: FieldDef = serde_json::from_str(r#"{"name":"block_num","type":"uint32"}"#).unwrap();
        assert_eq!(f, FieldDef::new("block_num", "uint32"));
        let back = serde_json::to_value(&f).unwrap();
        assert_eq!(back["type"], "uint32");
    }
}
