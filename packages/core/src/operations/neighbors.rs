//! Neighbor resolution
//!
//! `neighbors` is never maintained by hand. Every producer finishes with
//! [`define_neighbors`], which rebuilds it from the link list it returns.

use crate::models::{Link, Node};
use crate::operations::records::map_positions;

/// Rebuild every node's `neighbors` from `links`.
///
/// For each link whose endpoints both resolve, each endpoint's id is appended
/// to the other's list. Unresolved endpoints are skipped. Parallel links yield
/// repeated entries (the count is the multiplicity) and a self-loop lists the
/// node twice.
pub fn define_neighbors(nodes: &mut [Node], links: &[Link]) {
    for node in nodes.iter_mut() {
        node.neighbors.clear();
    }

    // Resolve positions first; the index borrows `nodes` immutably
    let resolved: Vec<(usize, usize, &Link)> = {
        let index = map_positions(nodes);
        links
            .iter()
            .filter_map(|link| {
                let from = *index.get(link.from.as_str())?;
                let to = *index.get(link.to.as_str())?;
                Some((from, to, link))
            })
            .collect()
    };

    for (from, to, link) in resolved {
        nodes[from].neighbors.push(link.to.clone());
        nodes[to].neighbors.push(link.from.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nodes(ids: &[&str]) -> Vec<Node> {
        ids.iter().map(|id| Node::new(*id, json!({}))).collect()
    }

    #[test]
    fn test_neighbors_are_symmetric() {
        let mut graph_nodes = nodes(&["a", "b", "c"]);
        define_neighbors(
            &mut graph_nodes,
            &[Link::new("a", "b"), Link::new("b", "c")],
        );

        assert_eq!(graph_nodes[0].neighbors, vec!["b"]);
        assert_eq!(graph_nodes[1].neighbors, vec!["a", "c"]);
        assert_eq!(graph_nodes[2].neighbors, vec!["b"]);
    }

    #[test]
    fn test_parallel_links_keep_multiplicity() {
        let mut graph_nodes = nodes(&["a", "b"]);
        define_neighbors(
            &mut graph_nodes,
            &[Link::new("a", "b"), Link::new("a", "b")],
        );

        assert_eq!(graph_nodes[0].neighbors, vec!["b", "b"]);
        assert_eq!(graph_nodes[1].neighbors, vec!["a", "a"]);
    }

    #[test]
    fn test_self_loop_lists_node_twice() {
        let mut graph_nodes = nodes(&["a"]);
        define_neighbors(&mut graph_nodes, &[Link::new("a", "a")]);
        assert_eq!(graph_nodes[0].neighbors, vec!["a", "a"]);
    }

    #[test]
    fn test_unresolved_endpoints_are_skipped() {
        let mut graph_nodes = nodes(&["a", "b"]);
        graph_nodes[0].neighbors = vec!["stale".to_string()];

        define_neighbors(
            &mut graph_nodes,
            &[Link::new("a", "ghost"), Link::new("b", "a")],
        );

        assert_eq!(graph_nodes[0].neighbors, vec!["b"]);
        assert_eq!(graph_nodes[1].neighbors, vec!["a"]);
    }
}
