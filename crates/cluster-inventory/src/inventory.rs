//! One full inventory computation

use crate::Result;
use crate::document::{HostTable, InventoryDocument, assemble};
use crate::globals::GlobalVariables;
use crate::hostvars::{HostVariableRecord, PxeHostSettings, compose};
use crate::node::parse_nodes;
use crate::roles::{RoleSet, partition};
use crate::secrets::SecretMaterial;
use crate::source::{ConfigSource, ConfigSourceLoader, ConfigSources};
use cluster_fs::InventoryLayout;

/// The result of a run: the document plus a flat host lookup table.
///
/// Records are computed once; the document and the lookup table hold the
/// same values.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    pub document: InventoryDocument,
    pub roles: RoleSet,
    hostvars: HostTable,
}

impl Inventory {
    /// Compute the inventory from already loaded sources.
    pub fn build(
        sources: &ConfigSources,
        secrets: &SecretMaterial,
        layout: &InventoryLayout,
    ) -> Self {
        let nodes = parse_nodes(&sources.section(ConfigSource::Nodes));
        let roles = partition(&nodes);

        let pxe = PxeHostSettings::from_sections(
            &sources.section(ConfigSource::Net),
            &sources.section(ConfigSource::Pxe),
        );

        let mut hostvars = HostTable::new();
        for node in &nodes {
            if let Some(role) = roles.role_of(&node.id) {
                hostvars.insert(node.id.clone(), compose(role, node, &pxe, secrets));
            }
        }
        // Controllers come first in the lookup table, as in the document
        let hostvars = hostvars.select(roles.controller.iter().chain(&roles.compute));

        let globals = GlobalVariables::compose(sources, secrets, layout);
        let document = assemble(
            &roles,
            &hostvars,
            globals,
            sources.section(ConfigSource::Metadata),
        );

        tracing::debug!(
            controllers = roles.controller.len(),
            computes = roles.compute.len(),
            declared = nodes.len(),
            "Built inventory"
        );

        Self {
            document,
            roles,
            hostvars,
        }
    }

    /// Load the sources and secrets of `layout` and compute the inventory.
    pub fn load(layout: &InventoryLayout) -> Result<Self> {
        let sources = ConfigSourceLoader::new(layout.clone()).load()?;
        let secrets = SecretMaterial::load(&layout.secrets_file())?;
        Ok(Self::build(&sources, &secrets, layout))
    }

    /// The record of `host`, if it is in either group.
    pub fn host(&self, host: &str) -> Option<&HostVariableRecord> {
        self.hostvars.get(host)
    }

    /// Every host record, controllers first.
    pub fn hostvars(&self) -> &HostTable {
        &self.hostvars
    }
}
