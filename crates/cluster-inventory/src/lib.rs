//! Inventory construction for a small compute cluster
//!
//! Turns the YAML sources under `<root>/config/` and the optional `<root>/.env`
//! secret file into a single Ansible inventory document:
//!
//! - **Sources**: six independently optional files, each defaulting to empty
//! - **Roles**: controller/compute split with first-node controller fallback
//! - **Host variables**: defaults, then per-node `variables`, then secrets
//! - **Global variables**: cluster identity, verbatim config, runtime credentials
//! - **Query**: full listing or single host, with the document persisted each run
//!
//! # Architecture
//!
//! ```text
//!            cluster-cli
//!                 |
//!          cluster-inventory
//!                 |
//!             cluster-fs
//! ```
//!
//! # Example
//!
//! ```ignore
//! use cluster_fs::InventoryLayout;
//! use cluster_inventory::{QueryMode, QueryService};
//!
//! let service = QueryService::new(InventoryLayout::new("/srv/cluster"));
//! service.run(&QueryMode::List, &mut std::io::stdout())?;
//! ```

pub mod document;
pub mod error;
pub mod globals;
pub mod hostvars;
pub mod inventory;
pub mod node;
pub mod query;
pub mod roles;
pub mod secrets;
pub mod source;

pub use document::{HostTable, InventoryDocument, assemble};
pub use error::{Error, Result};
pub use globals::{GlobalVariables, RuntimeCredentials};
pub use hostvars::{HostVariableRecord, PxeHostSettings, merge_layers};
pub use inventory::Inventory;
pub use node::Node;
pub use query::{QueryMode, QueryService};
pub use roles::{Role, RoleSet, partition};
pub use secrets::{DEFAULT_HASH_ROUNDS, SecretMaterial, hash_env_lines, hash_password};
pub use source::{ConfigSource, ConfigSourceLoader, ConfigSources};
