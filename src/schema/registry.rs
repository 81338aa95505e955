//! Prepared, read-only schema registry
//!
//! Preparation resolves names to indices once. Tables get their short tag
//! and per-field byte offsets; queries get their target table, the codec
//! for every range-key field and a validated join descriptor. Nothing is
//! mutated afterwards, so one registry serves every concurrent query.

use std::collections::HashMap;

use crate::codec::{KeyType, Symbol, TypeRegistry};
use crate::observability::{log_event, Event};

use super::errors::{SchemaError, SchemaResult};
use super::tables::table_tag;
use super::types::{KeyDef, QueryConfig, QueryDef, TableDef};

/// A table column with its resolved codec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub type_name: String,
    pub key_type: KeyType,
    /// Offset in the row's native encoding; `None` once a variable-size
    /// field has been passed
    pub byte_position: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub short_name: Symbol,
    pub fields: Vec<Field>,
    /// Primary key as indices into `fields`
    pub keys: Vec<usize>,
}

impl Table {
    /// Position of the field named `name`
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Field at `index`; panics if out of bounds
    pub fn field(&self, index: usize) -> &Field {
        &self.fields[index]
    }
}

/// Resolved join: looks up another query's index with fields of the matched row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    /// Index of the joined table
    pub table: usize,
    /// Index of the query whose index is searched
    pub query: usize,
    /// Primary-table fields forming the lookup key
    pub key_values: Vec<usize>,
    /// Joined-table fields appended to the result row
    pub fields_from_join: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub name: Symbol,
    pub table: usize,
    pub arg_types: Vec<KeyType>,
    pub range_types: Vec<KeyType>,
    pub is_state: bool,
    pub limit_block_num: bool,
    pub max_results: u32,
    pub join: Option<Join>,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    tables: Vec<Table>,
    queries: Vec<Query>,
    query_map: HashMap<Symbol, usize>,
}

impl Registry {
    /// Builds the registry from a query config and a type map.
    ///
    /// Any error leaves no registry behind.
    pub fn prepare(config: &QueryConfig, types: &TypeRegistry) -> SchemaResult<Self> {
        let tables = config.tables.len().to_string();
        let queries = config.queries.len().to_string();
        log_event(
            Event::RegistryPrepareBegin,
            &[("tables", tables.as_str()), ("queries", queries.as_str())],
        );
        match Self::build(config, types) {
            Ok(registry) => {
                log_event(
                    Event::RegistryPrepareComplete,
                    &[("tables", tables.as_str()), ("queries", queries.as_str())],
                );
                Ok(registry)
            }
            Err(err) => {
                log_event(
                    Event::RegistryPrepareFailed,
                    &[("code", err.code().code()), ("message", err.message())],
                );
                Err(err)
            }
        }
    }

    fn build(config: &QueryConfig, types: &TypeRegistry) -> SchemaResult<Self> {
        let mut registry = Registry::default();
        let mut table_map: HashMap<&str, usize> = HashMap::new();

        for def in &config.tables {
            if table_map.insert(&def.name, registry.tables.len()).is_some() {
                return Err(SchemaError::malformed_config(
                    "<tables>",
                    format!("table '{}' is defined more than once", def.name),
                ));
            }
            registry.tables.push(prepare_table(def, types)?);
        }

        for def in &config.queries {
            let name = Symbol::from_text(&def.name);
            if registry.query_map.contains_key(&name) {
                return Err(SchemaError::duplicate_query(&def.name));
            }
            let table = *table_map
                .get(def.table.as_str())
                .ok_or_else(|| SchemaError::unknown_table(&def.table))?;
            let query = prepare_query(def, name, table, &registry.tables[table], types)?;
            registry.query_map.insert(name, registry.queries.len());
            registry.queries.push(query);
        }

        // joins may name queries declared after them, so resolve last
        for (index, def) in config.queries.iter().enumerate() {
            let join = registry.prepare_join(def, index, &table_map)?;
            registry.queries[index].join = join;
        }

        Ok(registry)
    }

    fn prepare_join(
        &self,
        def: &QueryDef,
        index: usize,
        table_map: &HashMap<&str, usize>,
    ) -> SchemaResult<Option<Join>> {
        let (join_table_name, join_query_name) = match (&def.join_table, &def.join_query) {
            (None, None) => return Ok(None),
            (Some(table), Some(query)) => (table, query),
            _ => {
                return Err(SchemaError::unknown_join(
                    &def.name,
                    "join_table and join_query must be set together",
                ))
            }
        };
        let primary = &self.queries[index];
        let join_table = *table_map
            .get(join_table_name.as_str())
            .ok_or_else(|| SchemaError::unknown_table(join_table_name))?;
        let join_query = *self
            .query_map
            .get(&Symbol::from_text(join_query_name))
            .ok_or_else(|| {
                SchemaError::unknown_join(&def.name, format!("no query named '{}'", join_query_name))
            })?;
        let target = &self.queries[join_query];
        if target.table != join_table {
            return Err(SchemaError::unknown_join(
                &def.name,
                format!("query '{}' does not read '{}'", join_query_name, join_table_name),
            ));
        }
        if target.is_state && !primary.limit_block_num {
            return Err(SchemaError::unbounded_state_query(&def.name, join_table_name));
        }
        let key_count = def.join_key_values.len();
        let range_count = target.range_types.len();
        if key_count > range_count || (target.is_state && key_count != range_count) {
            return Err(SchemaError::unknown_join(
                &def.name,
                format!(
                    "{} join key fields for an index of {} fields",
                    key_count, range_count
                ),
            ));
        }

        let primary_table = &self.tables[primary.table];
        let key_values = resolve_readable(&def.name, primary_table, &def.join_key_values)?;
        for (&field, expected) in key_values.iter().zip(&target.range_types) {
            let field = primary_table.field(field);
            if !field.key_type.is_key_type() {
                return Err(SchemaError::unsupported_key_type(
                    &def.name,
                    &field.name,
                    &field.type_name,
                ));
            }
            if field.key_type.key_size() != expected.key_size() {
                return Err(SchemaError::unknown_join(
                    &def.name,
                    format!("'{}' does not match the joined index field type", field.name),
                ));
            }
        }
        let fields_from_join =
            resolve_readable(&def.name, &self.tables[join_table], &def.fields_from_join)?;

        Ok(Some(Join {
            table: join_table,
            query: join_query,
            key_values,
            fields_from_join,
        }))
    }

    /// Looks up a query by name
    pub fn query(&self, name: Symbol) -> Option<&Query> {
        self.query_map.get(&name).map(|&i| &self.queries[i])
    }

    /// Query by its index in the registry
    pub fn query_at(&self, index: usize) -> &Query {
        &self.queries[index]
    }

    /// Table by its index in the registry
    pub fn table_at(&self, index: usize) -> &Table {
        &self.tables[index]
    }

    /// Target table of a query
    pub fn table_of(&self, query: &Query) -> &Table {
        &self.tables[query.table]
    }

    /// Looks up a table by its long name
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// All prepared tables, in config order
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// All prepared queries, in config order
    pub fn queries(&self) -> &[Query] {
        &self.queries
    }
}

fn prepare_table(def: &TableDef, types: &TypeRegistry) -> SchemaResult<Table> {
    let short_name = table_tag(&def.name).ok_or_else(|| SchemaError::unknown_table(&def.name))?;

    let mut fields = Vec::with_capacity(def.fields.len());
    let mut position = Some(0u32);
    for field in &def.fields {
        let key_type = types
            .get(&field.type_name)
            .ok_or_else(|| SchemaError::unknown_type(&def.name, &field.name, &field.type_name))?;
        fields.push(Field {
            name: field.name.clone(),
            type_name: field.type_name.clone(),
            key_type,
            byte_position: position,
        });
        position = match (position, key_type.fixed_size()) {
            (Some(pos), Some(size)) => Some(pos + size),
            _ => None,
        };
    }

    let mut table = Table {
        name: def.name.clone(),
        short_name,
        fields,
        keys: Vec::new(),
    };
    table.keys = resolve_fields(&table, &def.keys)?;
    Ok(table)
}

fn prepare_query(
    def: &QueryDef,
    name: Symbol,
    table_index: usize,
    table: &Table,
    types: &TypeRegistry,
) -> SchemaResult<Query> {
    if def.is_state && !def.limit_block_num {
        return Err(SchemaError::unbounded_state_query(&def.name, &table.name));
    }

    let arg_types = def
        .args
        .iter()
        .map(|type_name| {
            types
                .get(type_name)
                .ok_or_else(|| SchemaError::unknown_type(&table.name, "<arg>", type_name))
        })
        .collect::<SchemaResult<Vec<_>>>()?;

    let mut range_types = Vec::with_capacity(def.range_keys.len());
    for index in resolve_fields(table, &def.range_keys)? {
        let field = table.field(index);
        if !field.key_type.is_key_type() {
            return Err(SchemaError::unsupported_key_type(
                &def.name,
                &field.name,
                &field.type_name,
            ));
        }
        range_types.push(field.key_type);
    }

    Ok(Query {
        name,
        table: table_index,
        arg_types,
        range_types,
        is_state: def.is_state,
        limit_block_num: def.limit_block_num,
        max_results: def.max_results,
        join: None,
    })
}

fn resolve_fields(table: &Table, keys: &[KeyDef]) -> SchemaResult<Vec<usize>> {
    keys.iter()
        .map(|key| {
            table
                .field_index(&key.name)
                .ok_or_else(|| SchemaError::unknown_field(&table.name, &key.name))
        })
        .collect()
}

/// Resolves fields that will be read out of row bytes by offset
fn resolve_readable(query: &str, table: &Table, keys: &[KeyDef]) -> SchemaResult<Vec<usize>> {
    let indices = resolve_fields(table, keys)?;
    for &index in &indices {
        let field = table.field(index);
        if field.byte_position.is_none() {
            return Err(SchemaError::unpositioned_field(query, &table.name, &field.name));
        }
    }
    Ok(indices)
}
