// CLASSIFICATION: COMMUNITY
// Filename: table.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Descriptor tables loaded from YAML or JSON.
//!
//! A table maps operation names to descriptors so option metadata can live
//! in a configuration file next to the program instead of in code.
//!
//! ```yaml
//! level:
//!   short_name: O
//!   long_name: oName
//!   default_value: "101"
//!   description: optimisation level
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::descriptor::Descriptor;
use crate::error::TableError;

/// Descriptors keyed by operation name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescriptorTable {
    entries: BTreeMap<String, Descriptor>,
}

impl DescriptorTable {
    /// Parse a YAML table.
    pub fn from_yaml(text: &str) -> Result<Self, TableError> {
        let table: Self = serde_yaml::from_str(text)?;
        debug!("loaded {} descriptors from yaml", table.entries.len());
        Ok(table)
    }

    /// Parse a JSON table.
    pub fn from_json(text: &str) -> Result<Self, TableError> {
        let table: Self = serde_json::from_str(text)?;
        debug!("loaded {} descriptors from json", table.entries.len());
        Ok(table)
    }

    /// Load a table from disk. `.json` files are read as JSON, anything
    /// else as YAML.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let data = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&data),
            _ => Self::from_yaml(&data),
        }
    }

    /// Descriptor for `operation`.
    pub fn get(&self, operation: &str) -> Result<Descriptor, TableError> {
        self.entries
            .get(operation)
            .cloned()
            .ok_or_else(|| TableError::MissingEntry(operation.to_owned()))
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, operation: impl Into<String>, descriptor: Descriptor) {
        self.entries.insert(operation.into(), descriptor);
    }

    /// Operation names in sorted order.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
level:
  short_name: O
  long_name: oName
  default_value: "101"
  description: optimisation level
trace:
  short_name: T
"#;

    #[test]
    fn yaml_table_fills_descriptors() {
        let table = DescriptorTable::from_yaml(YAML).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("level").unwrap(),
            Descriptor::new()
                .short('O')
                .long("oName")
                .default_value("101")
                .description("optimisation level")
        );
        assert_eq!(table.operations().collect::<Vec<_>>(), vec!["level", "trace"]);
    }

    #[test]
    fn json_table_matches_yaml() {
        let json = r#"{"trace":{"short_name":"T"},"level":{"short_name":"O","long_name":"oName","default_value":"101","description":"optimisation level"}}"#;
        assert_eq!(
            DescriptorTable::from_json(json).unwrap(),
            DescriptorTable::from_yaml(YAML).unwrap()
        );
    }

    #[test]
    fn missing_entry_is_an_error() {
        let table = DescriptorTable::default();
        assert!(table.is_empty());
        let err = table.get("level").unwrap_err();
        assert_eq!(err.to_string(), "descriptor table has no entry for operation level");
    }

    #[test]
    fn load_picks_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("options.yaml");
        let json = dir.path().join("options.json");
        fs::write(&yaml, YAML).unwrap();
        fs::write(&json, r#"{"trace":{"short_name":"T"}}"#).unwrap();
        assert_eq!(DescriptorTable::load(&yaml).unwrap().len(), 2);
        assert_eq!(
            DescriptorTable::load(&json).unwrap().get("trace").unwrap(),
            Descriptor::new().short('T')
        );
        assert!(matches!(
            DescriptorTable::load(&dir.path().join("absent.yaml")),
            Err(TableError::Io(_))
        ));
    }

    #[test]
    fn malformed_yaml_is_rejected() {
        assert!(matches!(
            DescriptorTable::from_yaml("level: [unclosed"),
            Err(TableError::Yaml(_))
        ));
    }
}
