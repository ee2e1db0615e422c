//! Node declarations from `nodes.yml`

use serde_json::{Map, Value};

/// One declared node.
///
/// Optional fields keep the raw value when the key is present (even if it is
/// `null`) so that defaults only apply to keys that were never written.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub role: Option<String>,
    pub ip: Option<Value>,
    pub mac: Option<Value>,
    pub connection: Map<String, Value>,
    pub variables: Map<String, Value>,
}

impl Node {
    /// Build a node from its entry in the `nodes:` mapping.
    ///
    /// A body that is not a mapping describes a node with no fields.
    pub fn from_entry(id: &str, body: &Value) -> Self {
        let empty = Map::new();
        let fields = body.as_object().unwrap_or(&empty);

        Self {
            id: id.to_string(),
            role: fields
                .get("role")
                .and_then(Value::as_str)
                .map(str::to_string),
            ip: fields.get("ip").cloned(),
            mac: fields.get("mac").cloned(),
            connection: object_or_empty(fields.get("connection")),
            variables: object_or_empty(fields.get("variables")),
        }
    }

    /// The address Ansible should connect to: the declared
    /// `connection.ansible_host`, else the node's `ip`, else its id.
    pub fn ansible_host(&self) -> Value {
        self.connection
            .get("ansible_host")
            .cloned()
            .or_else(|| self.ip.clone())
            .unwrap_or_else(|| Value::String(self.id.clone()))
    }

    /// A connection setting, or `default` when the key is not declared.
    pub fn connection_or(&self, key: &str, default: &str) -> Value {
        self.connection
            .get(key)
            .cloned()
            .unwrap_or_else(|| Value::String(default.to_string()))
    }
}

/// Every node of a `nodes:` mapping, in declaration order.
pub fn parse_nodes(section: &Map<String, Value>) -> Vec<Node> {
    section
        .iter()
        .map(|(id, body)| Node::from_entry(id, body))
        .collect()
}

fn object_or_empty(value: Option<&Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    }
}
