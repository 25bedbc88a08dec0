//! Supernode expansion and retraction
//!
//! A supernode in the display list is either **collapsed** (its children are
//! absent) or **expanded** (its children sit directly after it, in `CHILDREN`
//! order). [`expand_super_network`] moves a supernode from collapsed to
//! expanded; [`retract_super_network`] moves it back.
//!
//! # Contract
//!
//! - Caller-owned records are copied, never mutated
//! - The flat graph supplies the child records and the links spliced in
//! - `parentPosition` on every expanded child points at its owning supernode
//! - `neighbors` is recomputed from the returned link list
//! - An unknown supernode id yields `None` (a silent no-op)
//!
//! For a collapsed graph `G`, `retract(expand(G, S), S) == G`.

use crate::models::{Graph, Link, Node};
use crate::operations::neighbors::define_neighbors;
use crate::operations::records::{
    copy_links, copy_nodes, map_network_nodes, map_positions, map_super_children,
    process_child_links, process_child_nodes,
};
use std::collections::{HashMap, HashSet};

/// Splice a supernode's children into the display list.
///
/// Children are inserted immediately after the supernode. Flat links whose
/// `_from` is one of those children are appended, with `_to` redirected to the
/// supernode owning it, so expanded children link out to collapsed groups.
/// Spliced links that would still point outside the displayed list are
/// dropped.
///
/// Expanding a supernode that is already expanded returns the composition
/// unchanged rather than inserting a second copy of its children.
pub fn expand_super_network(
    flat_nodes: &[Node],
    flat_links: &[Link],
    aggr_nodes: &[Node],
    aggr_links: &[Link],
    supernode_id: &str,
) -> Option<Graph> {
    let flat_nodes = process_child_nodes(flat_nodes);
    let flat_links = process_child_links(flat_links);
    let mut nodes = copy_nodes(aggr_nodes);
    let mut links = copy_links(aggr_links);

    let Some(position) = supernode_position(&nodes, supernode_id) else {
        tracing::debug!("Expand ignored: no supernode '{}'", supernode_id);
        return None;
    };
    let children_ids = nodes[position].children_ids().to_vec();
    let child_set: HashSet<&str> = children_ids.iter().map(String::as_str).collect();

    if is_expanded(&nodes, position, &child_set) {
        tracing::debug!("Expand ignored: '{}' is already expanded", supernode_id);
        define_neighbors(&mut nodes, &links);
        return Some(Graph::new(nodes, links));
    }

    let children = resolve_children(&flat_nodes, &children_ids, supernode_id);
    let inserted = children.len();
    nodes.splice(position + 1..position + 1, children);

    let parents = map_super_children(&nodes);
    assign_parent_positions(&mut nodes, &parents);

    let displayed: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    let mut spliced = Vec::new();
    for mut link in flat_links
        .into_iter()
        .filter(|link| child_set.contains(link.from.as_str()))
    {
        link.sync_endpoints();
        if let Some(parent) = parents.get(&link.to) {
            link.redirect_to(parent);
        }

        if displayed.contains(link.to.as_str()) {
            spliced.push(link);
        } else {
            tracing::debug!(
                "Dropping spliced link '{}' -> '{}': target is not displayed",
                link.from,
                link.to
            );
        }
    }

    tracing::debug!(
        "Expanded '{}': {} children at position {}, {} links spliced",
        supernode_id,
        inserted,
        position + 1,
        spliced.len()
    );

    links.extend(spliced);
    define_neighbors(&mut nodes, &links);

    Some(Graph::new(nodes, links))
}

/// Remove a supernode's children from the display list.
///
/// The contiguous run of the supernode's children directly after it is
/// removed (at most as many records as resolve in the flat graph), together
/// with every link whose `_from` is one of those children. A collapsed
/// supernode keeps its node list; only its child links are dropped.
pub fn retract_super_network(
    flat_nodes: &[Node],
    aggr_nodes: &[Node],
    aggr_links: &[Link],
    supernode_id: &str,
) -> Option<Graph> {
    let mut nodes = copy_nodes(aggr_nodes);
    let mut links = copy_links(aggr_links);

    let Some(position) = supernode_position(&nodes, supernode_id) else {
        tracing::debug!("Retract ignored: no supernode '{}'", supernode_id);
        return None;
    };
    let children_ids = nodes[position].children_ids().to_vec();
    let child_set: HashSet<&str> = children_ids.iter().map(String::as_str).collect();

    let known = map_network_nodes(flat_nodes);
    let block_len = children_ids
        .iter()
        .filter(|id| known.contains_key(id.as_str()))
        .count();

    let run = nodes[position + 1..]
        .iter()
        .take(block_len)
        .take_while(|node| !node.is_supernode() && child_set.contains(node.id.as_str()))
        .count();
    nodes.drain(position + 1..position + 1 + run);

    let before = links.len();
    links.retain(|link| !child_set.contains(link.from.as_str()));

    let parents = map_super_children(&nodes);
    assign_parent_positions(&mut nodes, &parents);
    define_neighbors(&mut nodes, &links);

    tracing::debug!(
        "Retracted '{}': {} children removed, {} links dropped",
        supernode_id,
        run,
        before - links.len()
    );

    Some(Graph::new(nodes, links))
}

fn supernode_position(nodes: &[Node], supernode_id: &str) -> Option<usize> {
    nodes
        .iter()
        .position(|node| node.id == supernode_id && node.is_supernode())
}

/// Expanded means the record right after the supernode is one of its children
fn is_expanded(nodes: &[Node], position: usize, child_set: &HashSet<&str>) -> bool {
    nodes
        .get(position + 1)
        .map(|next| !next.is_supernode() && child_set.contains(next.id.as_str()))
        .unwrap_or(false)
}

fn resolve_children(flat_nodes: &[Node], children_ids: &[String], supernode_id: &str) -> Vec<Node> {
    let lookup = map_network_nodes(flat_nodes);
    children_ids
        .iter()
        .filter_map(|id| match lookup.get(id.as_str()) {
            Some(node) => Some((*node).clone()),
            None => {
                tracing::debug!(
                    "Child '{}' of '{}' is not in the flat graph, skipping",
                    id,
                    supernode_id
                );
                None
            }
        })
        .collect()
}

/// Point every `node`-typed record at its owning supernode's display index.
fn assign_parent_positions(nodes: &mut [Node], parents: &HashMap<String, String>) {
    let resolved: Vec<Option<usize>> = {
        let positions = map_positions(nodes);
        nodes
            .iter()
            .map(|node| {
                if !node.is_child_node() {
                    return None;
                }
                parents
                    .get(&node.id)
                    .and_then(|parent| positions.get(parent.as_str()).copied())
            })
            .collect()
    };

    for (node, parent_position) in nodes.iter_mut().zip(resolved) {
        if node.is_child_node() {
            node.parent_position = parent_position;
        }
    }
}

// Comprehensive tests in separate module
#[cfg(test)]
#[path = "expansion_test.rs"]
mod expansion_test;
