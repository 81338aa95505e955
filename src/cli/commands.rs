//! CLI command implementations

use std::path::Path;

use serde_json::{json, Value};

use crate::codec::{encode_key, Symbol, TypeRegistry};
use crate::keyspace::describe_key;
use crate::schema::{QueryConfig, Registry};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Runs one parsed command, writing its result to stdout
pub fn run_command(command: Command) -> CliResult<()> {
    let data = match command {
        Command::Prepare { config } => prepare(&config)?,
        Command::DescribeKey { key } => describe(&key)?,
        Command::EncodeSymbol { text } => encode_symbol(&text),
    };
    write_response(data)
}

/// Loads and prepares a query config, returning the resolved registry
pub fn prepare(config_path: &Path) -> CliResult<Value> {
    let config = QueryConfig::load(config_path)?;
    let registry = Registry::prepare(&config, &TypeRegistry::standard())?;
    Ok(registry_summary(&registry))
}

fn registry_summary(registry: &Registry) -> Value {
    let tables: Vec<Value> = registry
        .tables()
        .iter()
        .map(|table| {
            json!({
                "name": table.name,
                "short_name": table.short_name.to_string(),
                "fields": table.fields.iter().map(|f| json!({
                    "name": f.name,
                    "type": f.type_name,
                    "byte_position": f.byte_position,
                })).collect::<Vec<_>>(),
                "keys": table.keys.iter().map(|&k| table.field(k).name.clone()).collect::<Vec<_>>(),
            })
        })
        .collect();

    let queries: Vec<Value> = registry
        .queries()
        .iter()
        .map(|query| {
            let join = query.join.as_ref().map(|join| {
                json!({
                    "table": registry.table_at(join.table).name,
                    "query": registry.query_at(join.query).name.to_string(),
                })
            });
            json!({
                "name": query.name.to_string(),
                "table": registry.table_of(query).name,
                "is_state": query.is_state,
                "limit_block_num": query.limit_block_num,
                "max_results": query.max_results,
                "range_types": query.range_types.iter().map(|t| t.name()).collect::<Vec<_>>(),
                "join": join,
            })
        })
        .collect();

    json!({ "tables": tables, "queries": queries })
}

/// Decodes a hex key and describes it
pub fn describe(key_hex: &str) -> CliResult<Value> {
    let key = hex::decode(key_hex.trim())
        .map_err(|e| CliError::invalid_argument(format!("Invalid hex key: {}", e)))?;
    Ok(json!({
        "key": hex::encode(&key),
        "description": describe_key(&key),
    }))
}

pub fn encode_symbol(text: &str) -> Value {
    let symbol = Symbol::from_text(text);
    json!({
        "text": symbol.to_string(),
        "value": symbol.value(),
        "key": hex::encode(encode_key(&symbol)),
    })
}
