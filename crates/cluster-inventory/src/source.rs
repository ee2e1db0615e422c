//! Configuration source loading
//!
//! The cluster is described by six independently optional YAML files under
//! `<root>/config/`. A missing file, or one whose top level is not a mapping,
//! loads as an empty mapping. A file that fails to parse aborts the run.

use crate::{Error, Result};
use cluster_fs::{ConfigStore, InventoryLayout, NormalizedPath};
use serde_json::{Map, Number, Value};

/// One of the fixed configuration sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSource {
    Images,
    Metadata,
    Net,
    Nodes,
    Pxe,
    Roles,
}

impl ConfigSource {
    /// Every source, in load order.
    pub const ALL: [ConfigSource; 6] = [
        Self::Images,
        Self::Metadata,
        Self::Net,
        Self::Nodes,
        Self::Pxe,
        Self::Roles,
    ];

    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Metadata => "metadata",
            Self::Net => "net",
            Self::Nodes => "nodes",
            Self::Pxe => "pxe",
            Self::Roles => "roles",
        }
    }

    /// File name inside the config directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Images => "images.yml",
            Self::Metadata => "metadata.yml",
            Self::Net => "net.yml",
            Self::Nodes => "nodes.yml",
            Self::Pxe => "pxe.yml",
            Self::Roles => "roles.yml",
        }
    }

    /// Top-level key under which the file keeps its payload.
    pub fn section_key(&self) -> &'static str {
        match self {
            Self::Net => "network",
            other => other.name(),
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The loaded top-level mapping of every source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSources {
    images: Map<String, Value>,
    metadata: Map<String, Value>,
    net: Map<String, Value>,
    nodes: Map<String, Value>,
    pxe: Map<String, Value>,
    roles: Map<String, Value>,
}

impl ConfigSources {
    /// The whole top-level mapping of a source.
    pub fn document(&self, source: ConfigSource) -> &Map<String, Value> {
        match source {
            ConfigSource::Images => &self.images,
            ConfigSource::Metadata => &self.metadata,
            ConfigSource::Net => &self.net,
            ConfigSource::Nodes => &self.nodes,
            ConfigSource::Pxe => &self.pxe,
            ConfigSource::Roles => &self.roles,
        }
    }

    fn document_mut(&mut self, source: ConfigSource) -> &mut Map<String, Value> {
        match source {
            ConfigSource::Images => &mut self.images,
            ConfigSource::Metadata => &mut self.metadata,
            ConfigSource::Net => &mut self.net,
            ConfigSource::Nodes => &mut self.nodes,
            ConfigSource::Pxe => &mut self.pxe,
            ConfigSource::Roles => &mut self.roles,
        }
    }

    /// Replace one source's mapping.
    pub fn with(mut self, source: ConfigSource, document: Map<String, Value>) -> Self {
        *self.document_mut(source) = document;
        self
    }

    /// The payload section of a source, e.g. `network:` inside `net.yml`.
    ///
    /// Absent or non-mapping sections are empty.
    pub fn section(&self, source: ConfigSource) -> Map<String, Value> {
        match self.document(source).get(source.section_key()) {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        }
    }
}

/// Reads the fixed configuration sources of a cluster root.
#[derive(Debug, Clone)]
pub struct ConfigSourceLoader {
    layout: InventoryLayout,
    store: ConfigStore,
}

impl ConfigSourceLoader {
    pub fn new(layout: InventoryLayout) -> Self {
        Self {
            layout,
            store: ConfigStore::new(),
        }
    }

    /// Load every source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] for the first source that exists but
    /// is not well-formed YAML.
    pub fn load(&self) -> Result<ConfigSources> {
        let mut sources = ConfigSources::default();
        for source in ConfigSource::ALL {
            let document = self.load_one(source)?;
            *sources.document_mut(source) = document;
        }
        Ok(sources)
    }

    /// Load a single source as a mapping.
    pub fn load_one(&self, source: ConfigSource) -> Result<Map<String, Value>> {
        let path = self.layout.config_file(source.file_name());
        if !path.exists() {
            tracing::debug!(%path, source = %source, "No config source found, using empty mapping");
            return Ok(Map::new());
        }

        tracing::debug!(%path, source = %source, "Loading config source");
        let parsed: serde_yaml::Value = self
            .store
            .load(&path)
            .map_err(|e| parse_error(source, &path, e))?;

        match yaml_to_json(parsed) {
            Value::Object(map) => Ok(map),
            other => {
                tracing::debug!(%path, kind = value_kind(&other), "Config source is not a mapping, using empty mapping");
                Ok(Map::new())
            }
        }
    }
}

fn parse_error(source: ConfigSource, path: &NormalizedPath, error: cluster_fs::Error) -> Error {
    match error {
        cluster_fs::Error::ConfigParse { path, message, .. } => Error::ConfigParse {
            source_name: source.name().to_string(),
            path,
            message,
        },
        other => {
            tracing::debug!(%path, "Config source could not be read");
            Error::Fs(other)
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Convert a YAML value to JSON, keeping mapping order.
///
/// Non-string keys are rendered as their scalar text, tags are dropped and
/// non-finite floats become `null`.
pub fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match yaml_to_json(key) {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
