//! Per-host variable records
//!
//! A record is built from three layers applied in order, later layers
//! winning:
//!
//! 1. computed defaults for the node's role
//! 2. the node's own `variables:` mapping
//! 3. secrets, which only fill keys still unset after layer 2

use crate::node::Node;
use crate::roles::Role;
use crate::secrets::SecretMaterial;
use serde::Serialize;
use serde_json::{Map, Value};

const DEFAULT_PYTHON_INTERPRETER: &str = "/usr/bin/python3";
const DEFAULT_COMPUTE_USER: &str = "ansible";
const BECOME_PASSWORD_KEY: &str = "ansible_become_password";

/// The resolved variables of one host, in a stable key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HostVariableRecord(Map<String, Value>);

impl HostVariableRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for HostVariableRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// PXE settings copied onto the controller, resolved once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct PxeHostSettings {
    pub iface: Value,
    pub server_ip: Value,
    pub install_drive: Value,
    pub default_target: Value,
    pub menu_items: Value,
}

impl PxeHostSettings {
    /// Pick the controller-facing fields out of the `network:` and `pxe:`
    /// sections, using `""` or `[]` for anything missing.
    pub fn from_sections(network: &Map<String, Value>, pxe: &Map<String, Value>) -> Self {
        let install = pxe.get("install").and_then(Value::as_object);
        let ipxe = pxe.get("ipxe").and_then(Value::as_object);

        Self {
            iface: get_or(Some(network), "pxe_iface", empty_string()),
            server_ip: get_or(Some(network), "server_ip", empty_string()),
            install_drive: get_or(install, "drive", empty_string()),
            default_target: get_or(ipxe, "default_target", empty_string()),
            menu_items: get_or(ipxe, "menu", Value::Array(Vec::new())),
        }
    }
}

fn empty_string() -> Value {
    Value::String(String::new())
}

fn get_or(map: Option<&Map<String, Value>>, key: &str, default: Value) -> Value {
    map.and_then(|m| m.get(key)).cloned().unwrap_or(default)
}

/// Apply `overlay` on top of `base`.
///
/// Keys already in `base` keep their position and take the overlay's value;
/// new keys are appended in overlay order. Neither input is modified.
pub fn merge_layers(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Add `key` only if `record` does not define it yet.
fn fill_missing(record: &Map<String, Value>, key: &str, value: Option<&str>) -> Map<String, Value> {
    let mut filled = record.clone();
    if let Some(value) = value {
        if !filled.contains_key(key) {
            filled.insert(key.to_string(), Value::String(value.to_string()));
        }
    }
    filled
}

/// Computed defaults for a controller node.
pub fn controller_defaults(node: &Node, pxe: &PxeHostSettings) -> Map<String, Value> {
    let mut defaults = Map::new();
    defaults.insert("ansible_host".into(), node.ansible_host());
    defaults.insert(
        "ansible_connection".into(),
        node.connection_or("ansible_connection", "local"),
    );
    defaults.insert(
        "ansible_python_interpreter".into(),
        node.connection_or("ansible_python_interpreter", DEFAULT_PYTHON_INTERPRETER),
    );
    defaults.insert("cluster_role".into(), Role::Controller.as_str().into());
    defaults.insert("pxe_iface".into(), pxe.iface.clone());
    defaults.insert("pxe_server_ip".into(), pxe.server_ip.clone());
    defaults.insert("pxe_install_drive".into(), pxe.install_drive.clone());
    defaults.insert("pxe_default_target".into(), pxe.default_target.clone());
    defaults.insert("pxe_ipxe_menu_items".into(), pxe.menu_items.clone());
    defaults
}

/// Computed defaults for a compute node.
pub fn compute_defaults(node: &Node) -> Map<String, Value> {
    let mut defaults = Map::new();
    defaults.insert("ansible_host".into(), node.ansible_host());
    defaults.insert(
        "ansible_connection".into(),
        node.connection_or("ansible_connection", "ssh"),
    );
    defaults.insert(
        "ansible_user".into(),
        node.connection_or("ansible_user", DEFAULT_COMPUTE_USER),
    );
    defaults.insert(
        "ansible_python_interpreter".into(),
        node.connection_or("ansible_python_interpreter", DEFAULT_PYTHON_INTERPRETER),
    );
    defaults.insert("cluster_role".into(), Role::Compute.as_str().into());
    defaults.insert(
        "nic_mac".into(),
        node.mac.clone().unwrap_or_else(|| Value::Array(Vec::new())),
    );
    defaults
}

/// Build the record of a controller node.
pub fn compose_controller(
    node: &Node,
    pxe: &PxeHostSettings,
    secrets: &SecretMaterial,
) -> HostVariableRecord {
    let defaults = controller_defaults(node, pxe);
    let declared = merge_layers(&defaults, &node.variables);
    let with_secrets = fill_missing(
        &declared,
        BECOME_PASSWORD_KEY,
        secrets.controller_become_password.as_deref(),
    );
    HostVariableRecord(with_secrets)
}

/// Build the record of a compute node. Compute nodes receive no secrets.
pub fn compose_compute(node: &Node) -> HostVariableRecord {
    let defaults = compute_defaults(node);
    HostVariableRecord(merge_layers(&defaults, &node.variables))
}

/// Build the record for `node` in the group it was assigned to.
pub fn compose(
    role: Role,
    node: &Node,
    pxe: &PxeHostSettings,
    secrets: &SecretMaterial,
) -> HostVariableRecord {
    match role {
        Role::Controller => compose_controller(node, pxe, secrets),
        Role::Compute => compose_compute(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn no_pxe() -> PxeHostSettings {
        PxeHostSettings::from_sections(&Map::new(), &Map::new())
    }

    #[test]
    fn merge_keeps_positions_and_appends() {
        let base = obj(json!({"a": 1, "b": 2}));
        let overlay = obj(json!({"c": 3, "a": 10}));

        let merged = merge_layers(&base, &overlay);

        assert_eq!(Value::Object(merged.clone()), json!({"a": 10, "b": 2, "c": 3}));
        let keys: Vec<_> = merged.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(base, obj(json!({"a": 1, "b": 2})));
    }

    #[test]
    fn missing_pxe_settings_default_to_empty() {
        let pxe = no_pxe();
        assert_eq!(pxe.iface, json!(""));
        assert_eq!(pxe.install_drive, json!(""));
        assert_eq!(pxe.menu_items, json!([]));
    }

    #[test]
    fn pxe_settings_are_read_from_nested_sections() {
        let pxe = PxeHostSettings::from_sections(
            &obj(json!({"pxe_iface": "eno1", "server_ip": "10.0.0.1"})),
            &obj(json!({
                "install": {"drive": "/dev/nvme0n1"},
                "ipxe": {"default_target": "rocky", "menu": [{"name": "rocky"}]}
            })),
        );
        assert_eq!(pxe.iface, json!("eno1"));
        assert_eq!(pxe.server_ip, json!("10.0.0.1"));
        assert_eq!(pxe.install_drive, json!("/dev/nvme0n1"));
        assert_eq!(pxe.default_target, json!("rocky"));
        assert_eq!(pxe.menu_items, json!([{"name": "rocky"}]));
    }

    #[test]
    fn controller_record_layout() {
        let node = Node::from_entry("ctl", &json!({"ip": "10.0.0.1"}));
        let record = compose_controller(&node, &no_pxe(), &SecretMaterial::default());

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "ansible_host": "10.0.0.1",
                "ansible_connection": "local",
                "ansible_python_interpreter": "/usr/bin/python3",
                "cluster_role": "controller",
                "pxe_iface": "",
                "pxe_server_ip": "",
                "pxe_install_drive": "",
                "pxe_default_target": "",
                "pxe_ipxe_menu_items": []
            })
        );
        assert!(!record.contains_key(BECOME_PASSWORD_KEY));
    }

    #[test]
    fn compute_record_layout() {
        let node = Node::from_entry(
            "n1",
            &json!({"mac": ["aa:bb:cc:00:11:22"], "connection": {"ansible_user": "rocky"}}),
        );
        let record = compose_compute(&node);

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "ansible_host": "n1",
                "ansible_connection": "ssh",
                "ansible_user": "rocky",
                "ansible_python_interpreter": "/usr/bin/python3",
                "cluster_role": "compute",
                "nic_mac": ["aa:bb:cc:00:11:22"]
            })
        );
    }

    #[test]
    fn variables_override_defaults() {
        let node = Node::from_entry(
            "n1",
            &json!({"variables": {"ansible_connection": "paramiko", "cluster_role": "special", "extra": 1}}),
        );
        let record = compose_compute(&node);

        assert_eq!(record.get("ansible_connection"), Some(&json!("paramiko")));
        assert_eq!(record.get("cluster_role"), Some(&json!("special")));
        assert_eq!(record.keys().last().map(String::as_str), Some("extra"));
    }

    #[test]
    fn become_password_is_injected_for_controllers() {
        let secrets = SecretMaterial {
            controller_become_password: Some("s3cret".into()),
            ..SecretMaterial::default()
        };
        let node = Node::from_entry("ctl", &json!({}));

        let record = compose_controller(&node, &no_pxe(), &secrets);
        assert_eq!(record.get(BECOME_PASSWORD_KEY), Some(&json!("s3cret")));
        assert_eq!(record.keys().last().map(String::as_str), Some(BECOME_PASSWORD_KEY));
    }

    #[test]
    fn declared_become_password_is_never_overwritten() {
        let secrets = SecretMaterial {
            controller_become_password: Some("from-env".into()),
            ..SecretMaterial::default()
        };
        let node = Node::from_entry(
            "ctl",
            &json!({"variables": {"ansible_become_password": "operator"}}),
        );

        let record = compose_controller(&node, &no_pxe(), &secrets);
        assert_eq!(record.get(BECOME_PASSWORD_KEY), Some(&json!("operator")));
    }

    #[test]
    fn compute_nodes_get_no_secrets() {
        let secrets = SecretMaterial {
            controller_become_password: Some("s3cret".into()),
            ..SecretMaterial::default()
        };
        let node = Node::from_entry("n1", &json!({}));

        let record = compose(Role::Compute, &node, &no_pxe(), &secrets);
        assert!(!record.contains_key(BECOME_PASSWORD_KEY));
    }
}
