use cluster_inventory::node::parse_nodes;
use cluster_inventory::{Role, partition};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn role_strategy() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![
        Just(None),
        Just(Some("controller")),
        Just(Some("compute")),
        Just(Some("storage")),
    ]
}

fn nodes_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::vec(role_strategy(), 0..12).prop_map(|roles| {
        let mut section = Map::new();
        for (i, role) in roles.into_iter().enumerate() {
            let body = match role {
                Some(role) => json!({"role": role}),
                None => json!({}),
            };
            section.insert(format!("node{:02}", i), body);
        }
        section
    })
}

proptest! {
    #[test]
    fn groups_are_disjoint_and_drawn_from_the_nodes(section in nodes_strategy()) {
        let nodes = parse_nodes(&section);
        let roles = partition(&nodes);

        for id in &roles.controller {
            prop_assert!(!roles.compute.contains(id));
            prop_assert!(section.contains_key(id));
        }
        for id in &roles.compute {
            prop_assert!(section.contains_key(id));
        }
    }

    #[test]
    fn a_controller_exists_whenever_any_node_does(section in nodes_strategy()) {
        let nodes = parse_nodes(&section);
        let roles = partition(&nodes);

        prop_assert_eq!(roles.controller.is_empty(), nodes.is_empty());

        let declared: Vec<_> = nodes
            .iter()
            .filter(|n| n.role.as_deref().and_then(Role::from_tag) == Some(Role::Controller))
            .map(|n| n.id.clone())
            .collect();
        if declared.is_empty() && !nodes.is_empty() {
            prop_assert_eq!(roles.controller.clone(), vec![nodes[0].id.clone()]);
        } else {
            prop_assert_eq!(roles.controller.clone(), declared);
        }
    }

    #[test]
    fn declared_compute_nodes_stay_compute(section in nodes_strategy()) {
        let nodes = parse_nodes(&section);
        let roles = partition(&nodes);

        for (i, node) in nodes.iter().enumerate() {
            let tagged_compute = node.role.as_deref() == Some("compute");
            let promoted = i == 0 && roles.controller == vec![node.id.clone()];
            if tagged_compute && !promoted {
                prop_assert_eq!(roles.role_of(&node.id), Some(Role::Compute));
            }
        }
    }
}
