//! Attribute aggregation
//!
//! Collapses a flat graph into one supernode per distinct value of a chosen
//! attribute. Links are rewritten to run between supernodes and nodes that
//! were absorbed into a supernode are removed from the output list.

use crate::config::AggregationConfig;
use crate::models::{Graph, Link, LinkKind, Node, NodeKind};
use crate::operations::neighbors::define_neighbors;
use crate::operations::records::process_child_nodes;
use serde_json::json;
use std::collections::{HashMap, HashSet};

/// Build a supergraph grouped by `attribute`.
///
/// Supernodes are emitted in order of first appearance of their group key and
/// carry `GROUP` and `_key` properties holding that key. Every link is copied,
/// typed `superLink`, and has each endpoint redirected to the owning supernode.
/// Empty input yields an empty graph.
///
/// # Examples
///
/// ```rust
/// use supergraph_core::config::AggregationConfig;
/// use supergraph_core::models::{Link, Node};
/// use supergraph_core::operations::super_graph;
/// use serde_json::json;
///
/// let nodes = vec![
///     Node::new("a", json!({ "g": "X" })),
///     Node::new("b", json!({ "g": "X" })),
///     Node::new("c", json!({ "g": "Y" })),
/// ];
/// let links = vec![Link::new("a", "c")];
///
/// let graph = super_graph(&nodes, &links, "g", &AggregationConfig::default());
/// assert_eq!(graph.node_ids(), vec!["supernodes/X", "supernodes/Y"]);
/// assert_eq!(graph.links[0].from, "supernodes/X");
/// assert_eq!(graph.links[0].to, "supernodes/Y");
/// ```
pub fn super_graph(
    nodes: &[Node],
    links: &[Link],
    attribute: &str,
    config: &AggregationConfig,
) -> Graph {
    let new_nodes = process_child_nodes(nodes);

    // One supernode per distinct key, in first-seen order
    let mut supernodes: Vec<Node> = Vec::new();
    let mut super_map: HashMap<String, usize> = HashMap::new();
    for node in &new_nodes {
        let key = node.group_key(attribute);
        let slot = *super_map.entry(key.clone()).or_insert_with(|| {
            supernodes.push(Node::supernode(
                config.supernode_id(&key),
                Vec::new(),
                json!({ "GROUP": key, "_key": key }),
            ));
            supernodes.len() - 1
        });
        if let Some(children) = supernodes[slot].children.as_mut() {
            children.push(node.id.clone());
        }
    }

    let parents: HashMap<&str, &str> = supernodes
        .iter()
        .flat_map(|supernode| {
            supernode
                .children_ids()
                .iter()
                .map(move |child| (child.as_str(), supernode.id.as_str()))
        })
        .collect();

    let new_links: Vec<Link> = links
        .iter()
        .map(|link| {
            let mut copy = link.clone();
            copy.link_type = Some(LinkKind::SuperLink);
            if let Some(parent) = parents.get(link.from.as_str()) {
                copy.from = parent.to_string();
            }
            if let Some(parent) = parents.get(link.to.as_str()) {
                copy.to = parent.to_string();
            }
            copy.sync_endpoints();
            copy
        })
        .collect();

    let absorbed: HashSet<String> = parents.keys().map(|id| id.to_string()).collect();

    let mut combined: Vec<Node> = supernodes.iter().cloned().chain(new_nodes).collect();
    define_neighbors(&mut combined, &new_links);

    let final_nodes: Vec<Node> = combined
        .into_iter()
        .filter(|node| node.node_type == Some(NodeKind::Supernode) || !absorbed.contains(&node.id))
        .collect();

    tracing::debug!(
        "Attribute aggregation on '{}': {} nodes -> {} supernodes, {} links",
        attribute,
        nodes.len(),
        supernodes.len(),
        new_links.len()
    );

    Graph::new(final_nodes, new_links)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AggregationConfig {
        AggregationConfig::default()
    }

    #[test]
    fn test_groups_by_attribute_value() {
        let nodes = vec![
            Node::new("a", json!({ "g": "X" })),
            Node::new("b", json!({ "g": "X" })),
            Node::new("c", json!({ "g": "Y" })),
        ];
        let links = vec![Link::new("a", "c")];

        let graph = super_graph(&nodes, &links, "g", &config());

        assert_eq!(graph.nodes.len(), 2);
        let x = graph.node("supernodes/X").unwrap();
        assert_eq!(x.children_ids(), ["a".to_string(), "b".to_string()]);
        assert_eq!(x.node_type, Some(NodeKind::Supernode));
        assert_eq!(x.properties["GROUP"], json!("X"));
        assert_eq!(x.properties["_key"], json!("X"));
        assert_eq!(x.neighbors, vec!["supernodes/Y"]);

        let y = graph.node("supernodes/Y").unwrap();
        assert_eq!(y.children_ids(), ["c".to_string()]);
        assert_eq!(y.neighbors, vec!["supernodes/X"]);

        assert_eq!(graph.links.len(), 1);
        let link = &graph.links[0];
        assert_eq!(link.from, "supernodes/X");
        assert_eq!(link.to, "supernodes/Y");
        assert_eq!(link.source, "supernodes/X");
        assert_eq!(link.target, "supernodes/Y");
        assert_eq!(link.link_type, Some(LinkKind::SuperLink));
    }

    #[test]
    fn test_missing_attribute_forms_undefined_group() {
        let nodes = vec![
            Node::new("a", json!({ "g": "X" })),
            Node::new("b", json!({})),
        ];

        let graph = super_graph(&nodes, &[], "g", &config());

        assert_eq!(
            graph.node_ids(),
            vec!["supernodes/X", "supernodes/undefined"]
        );
        assert_eq!(
            graph.node("supernodes/undefined").unwrap().children_ids(),
            ["b".to_string()]
        );
    }

    #[test]
    fn test_numeric_and_string_keys_share_one_supernode() {
        let nodes = vec![
            Node::new("a", json!({ "year": 1999 })),
            Node::new("b", json!({ "year": "1999" })),
        ];

        let graph = super_graph(&nodes, &[], "year", &config());

        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].id, "supernodes/1999");
        assert_eq!(graph.nodes[0].children_ids().len(), 2);
    }

    #[test]
    fn test_intra_group_links_become_self_loops() {
        let nodes = vec![
            Node::new("a", json!({ "g": "X" })),
            Node::new("b", json!({ "g": "X" })),
        ];
        let links = vec![Link::new("a", "b")];

        let graph = super_graph(&nodes, &links, "g", &config());

        assert_eq!(graph.links[0].from, "supernodes/X");
        assert_eq!(graph.links[0].to, "supernodes/X");
        assert_eq!(graph.nodes[0].neighbors, vec!["supernodes/X", "supernodes/X"]);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let nodes = vec![Node::new("a", json!({ "g": "X" }))];
        let links = vec![Link::new("a", "a")];
        let before = (nodes.clone(), links.clone());

        let _ = super_graph(&nodes, &links, "g", &config());

        assert_eq!((nodes, links), before);
    }

    #[test]
    fn test_empty_input_yields_empty_graph() {
        let graph = super_graph(&[], &[], "g", &config());
        assert!(graph.is_empty());
    }
}
