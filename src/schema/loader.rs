//! Query config loading
//!
//! The config is read once at startup. Unreadable or malformed files are
//! fatal: there is no partially loaded config.

use std::fs;
use std::path::Path;

use super::errors::{SchemaError, SchemaResult};
use super::types::QueryConfig;

impl QueryConfig {
    /// Reads and parses a JSON query config file
    pub fn load(path: &Path) -> SchemaResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_config(path.display().to_string(), format!("Failed to read file: {}", e))
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parses JSON config text held in memory
    pub fn from_json(text: &str) -> SchemaResult<Self> {
        Self::parse(text, "<in-memory>")
    }

    fn parse(text: &str, source: &str) -> SchemaResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| SchemaError::malformed_config(source, format!("Invalid JSON: {}", e)))
    }

    /// Writes the config as pretty JSON
    pub fn save(&self, path: &Path) -> SchemaResult<()> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            SchemaError::malformed_config(path.display().to_string(), format!("Failed to serialize: {}", e))
        })?;
        fs::write(path, content).map_err(|e| {
            SchemaError::malformed_config(path.display().to_string(), format!("Failed to write file: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDef, SchemaErrorCode, TableDef};
    use tempfile::TempDir;

    fn sample() -> QueryConfig {
        QueryConfig {
            tables: vec![TableDef {
                name: "account".into(),
                fields: vec![FieldDef::new("name", "name")],
                keys: vec![],
            }],
            queries: vec![],
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("query-config.json");
        sample().save(&path).unwrap();
        assert_eq!(QueryConfig::load(&path).unwrap(), sample());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = QueryConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::MalformedConfig);
        assert!(err.message().contains("Failed to read"));
    }

    #[test]
    fn test_invalid_json() {
        let err = QueryConfig::from_json("{\"tables\": [").unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::MalformedConfig);
        assert!(err.message().contains("<in-memory>"));
    }

    #[test]
    fn test_empty_object() {
        assert_eq!(QueryConfig::from_json("{}").unwrap(), QueryConfig::default());
    }
}
