//! The dynamic-inventory entry point
//!
//! Serves either the full document or a single host's variables, and in
//! both cases persists the full document to `inventory/inventory.json`.

use crate::inventory::Inventory;
use crate::{Error, Result};
use cluster_fs::{ConfigStore, InventoryLayout, io};
use serde_json::{Map, Value};
use std::io::Write;

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryMode {
    /// The whole document (`--list`)
    #[default]
    List,
    /// One host's variables (`--host NAME`)
    Host(String),
}

impl QueryMode {
    /// A non-empty `--host` selects single-host mode; anything else lists.
    pub fn from_host(host: Option<String>) -> Self {
        match host {
            Some(name) if !name.is_empty() => Self::Host(name),
            _ => Self::List,
        }
    }
}

/// Builds the inventory for a root and answers one query per call.
#[derive(Debug, Clone)]
pub struct QueryService {
    layout: InventoryLayout,
    store: ConfigStore,
}

impl QueryService {
    pub fn new(layout: InventoryLayout) -> Self {
        Self {
            layout,
            store: ConfigStore::new(),
        }
    }

    pub fn layout(&self) -> &InventoryLayout {
        &self.layout
    }

    /// Answer `mode` on `out`, then persist the full document.
    ///
    /// The document is built before anything is written, so a configuration
    /// error produces no output at all. A failed persist does not retract
    /// what was already written to `out`.
    pub fn run<W: Write>(&self, mode: &QueryMode, out: &mut W) -> Result<Inventory> {
        let inventory = Inventory::load(&self.layout)?;

        let text = self.render(&inventory, mode)?;
        out.write_all(text.as_bytes())?;
        out.flush()?;

        self.persist(&inventory)?;
        Ok(inventory)
    }

    /// Pretty JSON for `mode`, newline-terminated. Unknown hosts render `{}`.
    pub fn render(&self, inventory: &Inventory, mode: &QueryMode) -> Result<String> {
        let mut text = match mode {
            QueryMode::List => serde_json::to_string_pretty(&inventory.document)?,
            QueryMode::Host(name) => match inventory.host(name) {
                Some(record) => serde_json::to_string_pretty(record)?,
                None => {
                    tracing::debug!(host = %name, "Unknown host, answering with an empty object");
                    serde_json::to_string_pretty(&Value::Object(Map::new()))?
                }
            },
        };
        text.push('\n');
        Ok(text)
    }

    /// Overwrite the persisted document with `inventory`.
    pub fn persist(&self, inventory: &Inventory) -> Result<()> {
        let path = self.layout.output_file();
        let output_error = |source| Error::OutputWrite {
            path: path.to_native(),
            source,
        };

        let content = self
            .store
            .render(&path, &inventory.document)
            .map_err(output_error)?;
        io::write_text(&path, &content).map_err(output_error)?;

        tracing::debug!(%path, "Persisted inventory document");
        Ok(())
    }
}
