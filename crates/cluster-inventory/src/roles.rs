//! Partitioning nodes into the controller and compute groups

use crate::node::Node;

/// The two inventory groups a node can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Controller,
    Compute,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Controller => "controller",
            Self::Compute => "compute",
        }
    }

    /// Parse a `role:` tag; anything other than the two group names is `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "controller" => Some(Self::Controller),
            "compute" => Some(Self::Compute),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Node ids per group, each in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    pub controller: Vec<String>,
    pub compute: Vec<String>,
}

impl RoleSet {
    /// Which group `id` ended up in, if any.
    pub fn role_of(&self, id: &str) -> Option<Role> {
        if self.controller.iter().any(|n| n == id) {
            Some(Role::Controller)
        } else if self.compute.iter().any(|n| n == id) {
            Some(Role::Compute)
        } else {
            None
        }
    }
}

/// Split nodes by their `role` tag.
///
/// When no node is tagged `controller` the first declared node is promoted
/// to controller (and leaves compute if it was there). Nodes without a
/// recognised role that are not promoted appear in neither group.
pub fn partition(nodes: &[Node]) -> RoleSet {
    let mut roles = RoleSet::default();

    for node in nodes {
        match node.role.as_deref().and_then(Role::from_tag) {
            Some(Role::Controller) => roles.controller.push(node.id.clone()),
            Some(Role::Compute) => roles.compute.push(node.id.clone()),
            None => {}
        }
    }

    if roles.controller.is_empty() {
        if let Some(first) = nodes.first() {
            tracing::debug!(node = %first.id, "No controller declared, promoting first node");
            roles.compute.retain(|id| id != &first.id);
            roles.controller.push(first.id.clone());
        }
    }

    for node in nodes {
        if roles.role_of(&node.id).is_none() {
            tracing::debug!(node = %node.id, role = ?node.role, "Node has no inventory role, leaving it out");
        }
    }

    roles
}
