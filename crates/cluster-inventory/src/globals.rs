//! Cluster-wide variables
//!
//! Everything under `all.vars`: cluster identity, verbatim copies of the
//! role/network/PXE/image configuration, and the PXE runtime credentials.

use crate::secrets::SecretMaterial;
use crate::source::{ConfigSource, ConfigSources};
use cluster_fs::InventoryLayout;
use serde::Serialize;
use serde_json::{Map, Value};

const DEFAULT_RUNTIME_USERNAME: &str = "ansible";

/// Login name and password hashes used by PXE-installed hosts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeCredentials {
    pub username: Value,
    pub root_password_hash: Option<String>,
    pub local_user_password_hash: Option<String>,
}

impl RuntimeCredentials {
    /// The local user hash falls back to the root hash, so a single hash
    /// may cover both accounts.
    pub fn new(pxe: &Map<String, Value>, secrets: &SecretMaterial) -> Self {
        Self {
            username: pxe
                .get("username")
                .cloned()
                .unwrap_or_else(|| Value::String(DEFAULT_RUNTIME_USERNAME.to_string())),
            root_password_hash: secrets.root_password_hash.clone(),
            local_user_password_hash: secrets
                .effective_local_user_password_hash()
                .map(str::to_string),
        }
    }
}

/// The `all.vars` mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalVariables {
    pub cluster_name: Value,
    pub cluster_description: Value,
    pub cluster_repo_root: String,
    pub cluster_config_root: String,
    pub cluster_roles: Map<String, Value>,
    pub network_config: Map<String, Value>,
    pub pxe_config: Map<String, Value>,
    pub images: Map<String, Value>,
    pub pxe_runtime_credentials: RuntimeCredentials,
}

impl GlobalVariables {
    pub fn compose(
        sources: &ConfigSources,
        secrets: &SecretMaterial,
        layout: &InventoryLayout,
    ) -> Self {
        let pxe = sources.section(ConfigSource::Pxe);
        let metadata = sources.section(ConfigSource::Metadata);
        let metadata_document = sources.document(ConfigSource::Metadata);

        Self {
            cluster_name: metadata_field(&metadata, metadata_document, "name"),
            cluster_description: metadata_field(&metadata, metadata_document, "description"),
            cluster_repo_root: layout.root().to_string(),
            cluster_config_root: layout.config_dir().to_string(),
            cluster_roles: sources.section(ConfigSource::Roles),
            network_config: sources.section(ConfigSource::Net),
            pxe_runtime_credentials: RuntimeCredentials::new(&pxe, secrets),
            pxe_config: pxe,
            images: sources.section(ConfigSource::Images),
        }
    }
}

/// Prefer `metadata.<key>`, then a top-level `<key>` in `metadata.yml`.
fn metadata_field(section: &Map<String, Value>, document: &Map<String, Value>, key: &str) -> Value {
    section
        .get(key)
        .or_else(|| document.get(key))
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sources_with(source: ConfigSource, document: Value) -> ConfigSources {
        ConfigSources::default().with(source, document.as_object().unwrap().clone())
    }

    fn layout() -> InventoryLayout {
        InventoryLayout::new("/srv/cluster-does-not-exist")
    }

    #[test]
    fn nested_metadata_wins() {
        let sources = sources_with(
            ConfigSource::Metadata,
            json!({"name": "outer", "metadata": {"name": "inner", "description": "lab"}}),
        );
        let vars = GlobalVariables::compose(&sources, &SecretMaterial::default(), &layout());
        assert_eq!(vars.cluster_name, json!("inner"));
        assert_eq!(vars.cluster_description, json!("lab"));
    }

    #[test]
    fn top_level_metadata_is_the_fallback() {
        let sources = sources_with(
            ConfigSource::Metadata,
            json!({"name": "outer", "description": "flat"}),
        );
        let vars = GlobalVariables::compose(&sources, &SecretMaterial::default(), &layout());
        assert_eq!(vars.cluster_name, json!("outer"));
        assert_eq!(vars.cluster_description, json!("flat"));
    }

    #[test]
    fn missing_metadata_is_empty_string() {
        let vars = GlobalVariables::compose(
            &ConfigSources::default(),
            &SecretMaterial::default(),
            &layout(),
        );
        assert_eq!(vars.cluster_name, json!(""));
        assert_eq!(vars.cluster_description, json!(""));
        assert!(vars.images.is_empty());
    }

    #[test]
    fn root_hash_covers_local_user() {
        let secrets = SecretMaterial {
            root_password_hash: Some("X".into()),
            ..SecretMaterial::default()
        };
        let creds = RuntimeCredentials::new(&Map::new(), &secrets);
        assert_eq!(
            serde_json::to_value(&creds).unwrap(),
            json!({
                "username": "ansible",
                "root_password_hash": "X",
                "local_user_password_hash": "X"
            })
        );
    }

    #[test]
    fn absent_hashes_are_null() {
        let creds = RuntimeCredentials::new(&Map::new(), &SecretMaterial::default());
        assert_eq!(
            serde_json::to_value(&creds).unwrap(),
            json!({
                "username": "ansible",
                "root_password_hash": null,
                "local_user_password_hash": null
            })
        );
    }

    #[test]
    fn pxe_username_is_used() {
        let pxe = json!({"username": "installer"});
        let creds = RuntimeCredentials::new(pxe.as_object().unwrap(), &SecretMaterial::default());
        assert_eq!(creds.username, json!("installer"));
    }

    #[test]
    fn paths_come_from_the_layout() {
        let vars = GlobalVariables::compose(
            &ConfigSources::default(),
            &SecretMaterial::default(),
            &layout(),
        );
        assert_eq!(vars.cluster_repo_root, "/srv/cluster-does-not-exist");
        assert_eq!(vars.cluster_config_root, "/srv/cluster-does-not-exist/config");
    }
}
