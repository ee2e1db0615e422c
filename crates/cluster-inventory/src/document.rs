//! The inventory document and its assembly
//!
//! ```text
//! all:
//!   cluster_metadata: {...}
//!   children:
//!     controller: { hosts: { <name>: <host vars> } }
//!     compute:    { hosts: { <name>: <host vars> } }
//!   vars: {...}
//! ```
//!
//! Host variables are embedded under each host so a YAML inventory consumer
//! sees them without a `_meta.hostvars` section.

use crate::globals::GlobalVariables;
use crate::hostvars::HostVariableRecord;
use crate::roles::RoleSet;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Host records keyed by host name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostTable(Vec<(String, HostVariableRecord)>);

impl HostTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record of `name`.
    pub fn insert(&mut self, name: impl Into<String>, record: HostVariableRecord) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = record,
            None => self.0.push((name, record)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&HostVariableRecord> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, record)| record)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The records of `names`, in that order, skipping unknown names.
    pub fn select<'a>(&self, names: impl IntoIterator<Item = &'a String>) -> Self {
        let mut selected = Self::new();
        for name in names {
            if let Some(record) = self.get(name) {
                selected.insert(name.clone(), record.clone());
            }
        }
        selected
    }
}

impl Serialize for HostTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, record)| (name, record)))
    }
}

/// A group with its embedded hosts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HostGroup {
    pub hosts: HostTable,
}

/// The two child groups of `all`, controller first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryChildren {
    pub controller: HostGroup,
    pub compute: HostGroup,
}

/// The `all` group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllGroup {
    pub cluster_metadata: Map<String, Value>,
    pub children: InventoryChildren,
    pub vars: GlobalVariables,
}

/// The root inventory document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryDocument {
    pub all: AllGroup,
}

/// Assemble the document from already computed parts.
///
/// `hostvars` must hold a record for every node in `roles`.
pub fn assemble(
    roles: &RoleSet,
    hostvars: &HostTable,
    globals: GlobalVariables,
    cluster_metadata: Map<String, Value>,
) -> InventoryDocument {
    InventoryDocument {
        all: AllGroup {
            cluster_metadata,
            children: InventoryChildren {
                controller: HostGroup {
                    hosts: hostvars.select(&roles.controller),
                },
                compute: HostGroup {
                    hosts: hostvars.select(&roles.compute),
                },
            },
            vars: globals,
        },
    }
}
