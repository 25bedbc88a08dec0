//! Copy and lookup helpers shared by the aggregation operations
//!
//! Every transformation works on its own copies of the caller's records.
//! These helpers produce those copies and the id maps built over them.

use crate::models::{Link, LinkKind, Node, NodeKind};
use std::collections::HashMap;

/// Copy nodes with `neighbors` cleared (they are recomputed afterwards)
pub fn copy_nodes(nodes: &[Node]) -> Vec<Node> {
    nodes
        .iter()
        .map(|node| {
            let mut copy = node.clone();
            copy.neighbors.clear();
            copy
        })
        .collect()
}

/// Copy links with `source`/`target` re-synced from `_from`/`_to`
pub fn copy_links(links: &[Link]) -> Vec<Link> {
    links
        .iter()
        .map(|link| {
            let mut copy = link.clone();
            copy.sync_endpoints();
            copy
        })
        .collect()
}

/// Copy flat nodes and stamp them as `node`
pub fn process_child_nodes(nodes: &[Node]) -> Vec<Node> {
    copy_nodes(nodes)
        .into_iter()
        .map(|mut node| {
            node.node_type = Some(NodeKind::Node);
            node
        })
        .collect()
}

/// Copy flat links and stamp them as `link`
pub fn process_child_links(links: &[Link]) -> Vec<Link> {
    links
        .iter()
        .map(|link| {
            let mut copy = link.clone();
            copy.link_type = Some(LinkKind::Link);
            copy
        })
        .collect()
}

/// Map node ids to node records
pub fn map_network_nodes(nodes: &[Node]) -> HashMap<&str, &Node> {
    nodes.iter().map(|node| (node.id.as_str(), node)).collect()
}

/// Map node ids to their position in the list
pub fn map_positions(nodes: &[Node]) -> HashMap<&str, usize> {
    nodes
        .iter()
        .enumerate()
        .map(|(position, node)| (node.id.as_str(), position))
        .collect()
}

/// Map every child id to the id of the supernode that owns it.
///
/// Records typed `node` are skipped even if they carry `CHILDREN`.
pub fn map_super_children(nodes: &[Node]) -> HashMap<String, String> {
    let mut parents = HashMap::new();
    for supernode in nodes.iter().filter(|node| node.is_supernode()) {
        for child in supernode.children_ids() {
            parents.insert(child.clone(), supernode.id.clone());
        }
    }
    parents
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_copies_never_alias_caller_records() {
        let mut original = Node::new("a", json!({ "g": "X" }));
        original.neighbors = vec!["b".to_string()];
        let nodes = vec![original];

        let mut copies = process_child_nodes(&nodes);
        copies[0].properties.insert("g".to_string(), json!("Y"));

        assert_eq!(nodes[0].properties["g"], json!("X"));
        assert_eq!(nodes[0].neighbors, vec!["b".to_string()]);
        assert!(copies[0].neighbors.is_empty());
        assert_eq!(copies[0].node_type, Some(NodeKind::Node));
    }

    #[test]
    fn test_process_child_links_stamps_type() {
        let links = process_child_links(&[Link::new("a", "b")]);
        assert_eq!(links[0].link_type, Some(LinkKind::Link));
    }

    #[test]
    fn test_copy_links_fills_missing_mirrors() {
        let mut bare = Link::new("supernodes/X", "supernodes/Y");
        bare.source.clear();
        bare.target.clear();

        let links = copy_links(&[bare]);
        assert_eq!(links[0].source, "supernodes/X");
        assert_eq!(links[0].target, "supernodes/Y");
    }

    #[test]
    fn test_map_super_children_skips_plain_nodes() {
        let mut plain = Node::new("a", json!({}));
        plain.node_type = Some(NodeKind::Node);
        plain.children = Some(vec!["ghost".to_string()]);
        let nodes = vec![
            Node::supernode("supernodes/X", vec!["b".into(), "c".into()], json!({})),
            plain,
        ];

        let parents = map_super_children(&nodes);
        assert_eq!(parents.len(), 2);
        assert_eq!(parents.get("b").map(String::as_str), Some("supernodes/X"));
        assert!(!parents.contains_key("ghost"));
    }
}
