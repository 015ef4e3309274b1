//! Fog configuration loaded from YAML.
//!
//! The configuration has two top-level sections:
//!
//! ```yaml
//! transform:
//!   mydb:
//!     users:
//!       email: safe_email
//!       address:
//!         city: city
//!         zip: delete
//!     sessions: delete
//! filters:
//!   mydb:
//!     users: { active: true }
//! ```
//!
//! `transform` maps database → collection → either the literal `delete`
//! (remove every document) or a nested field mapping. Field mappings are kept
//! as raw YAML here and validated when they are compiled against a generator
//! registry. `filters` optionally scopes which documents of a transformed
//! collection are visited; it is never consulted when vacating.

use bson::{Bson, Document};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Literal marking a whole collection, or a single field, for deletion.
pub const DELETE_MARKER: &str = "delete";

/// Errors raised while loading a fog configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading the config file
    #[error("Failed to read fog config: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Well-formed YAML with the wrong shape
    #[error("Invalid fog config: {0}")]
    Invalid(String),
}

/// A parsed fog configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FogConfig {
    pub transform: TransformSpec,
    pub filters: Filters,
}

/// Databases and collections to fog, in file order.
///
/// Callers must not rely on the order; it is preserved only to make logs
/// follow the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformSpec {
    pub databases: Vec<DatabaseSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSpec {
    pub name: String,
    pub collections: Vec<CollectionEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionEntry {
    pub name: String,
    pub spec: CollectionSpec,
}

/// What to do with one collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionSpec {
    /// Remove every document.
    Vacate,
    /// Rewrite fields according to a nested field → generator mapping.
    Fields(Mapping),
}

/// Per-collection query predicates, keyed by database then collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    by_database: BTreeMap<String, BTreeMap<String, Document>>,
}

impl FogConfig {
    /// Load a fog configuration from a YAML (or JSON) file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a fog configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let root: Value = serde_yaml::from_str(yaml)?;
        Self::from_value(&root)
    }

    /// Build a fog configuration from an already parsed YAML value.
    pub fn from_value(root: &Value) -> Result<Self, ConfigError> {
        let root = match root {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Err(ConfigError::Invalid("config is empty".to_string())),
            other => {
                return Err(ConfigError::Invalid(format!(
                    "expected a mapping at the top level, found {}",
                    value_kind(other)
                )))
            }
        };

        let transform = root
            .get("transform")
            .ok_or_else(|| ConfigError::Invalid("missing `transform` section".to_string()))
            .and_then(TransformSpec::from_value)?;

        let filters = match root.get("filters") {
            Some(value) => Filters::from_value(value)?,
            None => Filters::default(),
        };

        Ok(Self { transform, filters })
    }
}

impl TransformSpec {
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let databases = match value {
            Value::Null => Vec::new(),
            Value::Mapping(databases) => databases
                .iter()
                .map(|(key, collections)| {
                    let name = mapping_key(key, "transform")?;
                    let collections = parse_collections(&name, collections)?;
                    Ok(DatabaseSpec { name, collections })
                })
                .collect::<Result<Vec<_>, ConfigError>>()?,
            other => {
                return Err(ConfigError::Invalid(format!(
                    "`transform` must be a mapping of databases, found {}",
                    value_kind(other)
                )))
            }
        };
        Ok(Self { databases })
    }

    /// Total number of configured collections across all databases.
    pub fn collection_count(&self) -> usize {
        self.databases.iter().map(|db| db.collections.len()).sum()
    }
}

fn parse_collections(database: &str, value: &Value) -> Result<Vec<CollectionEntry>, ConfigError> {
    let collections = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(collections) => collections,
        other => {
            return Err(ConfigError::Invalid(format!(
                "database `{database}` must be a mapping of collections, found {}",
                value_kind(other)
            )))
        }
    };

    collections
        .iter()
        .map(|(key, spec)| {
            let name = mapping_key(key, database)?;
            let spec = match spec {
                Value::String(s) if s == DELETE_MARKER => CollectionSpec::Vacate,
                Value::Mapping(fields) => CollectionSpec::Fields(fields.clone()),
                other => {
                    return Err(ConfigError::Invalid(format!(
                        "collection `{database}.{name}` must be a field mapping or \"{DELETE_MARKER}\", found {}",
                        value_kind(other)
                    )))
                }
            };
            Ok(CollectionEntry { name, spec })
        })
        .collect()
}

impl Filters {
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let mut filters = Self::default();
        let databases = match value {
            Value::Null => return Ok(filters),
            Value::Mapping(databases) => databases,
            other => {
                return Err(ConfigError::Invalid(format!(
                    "`filters` must be a mapping of databases, found {}",
                    value_kind(other)
                )))
            }
        };

        for (db_key, collections) in databases {
            let database = mapping_key(db_key, "filters")?;
            let collections = match collections {
                Value::Null => continue,
                Value::Mapping(collections) => collections,
                other => {
                    return Err(ConfigError::Invalid(format!(
                        "filters for database `{database}` must be a mapping, found {}",
                        value_kind(other)
                    )))
                }
            };
            for (coll_key, predicate) in collections {
                let collection = mapping_key(coll_key, &database)?;
                if predicate.is_null() {
                    continue;
                }
                let predicate = yaml_to_document(predicate).map_err(|reason| {
                    ConfigError::Invalid(format!("filter for `{database}.{collection}`: {reason}"))
                })?;
                filters.insert(database.clone(), collection, predicate);
            }
        }

        Ok(filters)
    }

    pub fn insert(
        &mut self,
        database: impl Into<String>,
        collection: impl Into<String>,
        predicate: Document,
    ) {
        self.by_database
            .entry(database.into())
            .or_default()
            .insert(collection.into(), predicate);
    }

    /// The predicate for a collection, if one was configured.
    pub fn get(&self, database: &str, collection: &str) -> Option<&Document> {
        self.by_database.get(database)?.get(collection)
    }

    pub fn is_empty(&self) -> bool {
        self.by_database.values().all(BTreeMap::is_empty)
    }
}

/// Convert a YAML mapping key to a string.
///
/// Scalars are accepted and stringified; sequences, mappings and nulls are not.
pub fn mapping_key(key: &Value, context: &str) -> Result<String, ConfigError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ConfigError::Invalid(format!(
            "unsupported key of type {} under `{context}`",
            value_kind(other)
        ))),
    }
}

/// Convert a YAML predicate to BSON, going through Extended JSON so values
/// like `{ $oid: ... }` and `{ $date: ... }` become their BSON types.
fn yaml_to_document(value: &Value) -> Result<Document, String> {
    let json = serde_json::to_value(value).map_err(|e| e.to_string())?;
    match Bson::try_from(json).map_err(|e| e.to_string())? {
        Bson::Document(document) => Ok(document),
        other => Err(format!("expected a mapping, found {:?}", other.element_type())),
    }
}

/// Human readable name of a YAML value's type, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
