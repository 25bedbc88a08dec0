//! Schema aggregation
//!
//! Groups flat nodes under user-selected levels of a classification
//! hierarchy. Each node's raw classification is resolved by a bounded
//! lineage walk over a [`SchemaTable`]; anything the walk cannot place lands
//! in the catch-all supernode (`Null` by default).
//!
//! # Lineage Walk
//!
//! Starting from the upper-cased, trimmed classification, each step:
//!
//! 1. Substitutes a fuzzy match when the key is not in the table
//! 2. Resolves to the key if it is a selected label
//! 3. Resolves to the key's parent if that is a selected label
//! 4. Gives up once the depth budget is spent or the chain ends
//! 5. Otherwise moves to the parent and repeats
//!
//! The walk therefore always terminates within `max_lineage_depth` hops.

use crate::config::AggregationConfig;
use crate::models::{Graph, Link, LinkKind, Node, SchemaTable};
use crate::operations::neighbors::define_neighbors;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};

/// Result of a lineage walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineageOutcome {
    /// The walk reached a selected label
    Resolved(String),
    /// Budget exhausted or chain ended without reaching a selected label
    Unresolved,
}

/// Walk the hierarchy upward from `key` until a selected label is found.
pub fn resolve_lineage(
    key: &str,
    selected: &HashSet<&str>,
    schema: &SchemaTable,
    config: &AggregationConfig,
) -> LineageOutcome {
    let mut key = key.to_string();

    for depth in 0..=config.max_lineage_depth {
        if !schema.contains(&key) {
            if let Some(matched) = schema.fuzzy_match(&key, config.fuzzy_prefix_len) {
                key = matched.to_string();
            }
        }

        if selected.contains(key.as_str()) {
            return LineageOutcome::Resolved(key);
        }

        let parent = schema.parent_of(&key);
        if let Some(parent) = parent {
            if selected.contains(parent) {
                return LineageOutcome::Resolved(parent.to_string());
            }
        }

        if depth == config.max_lineage_depth {
            break;
        }

        match parent {
            Some(parent) => key = parent.to_string(),
            None => break,
        }
    }

    LineageOutcome::Unresolved
}

/// Normalized classification key of a node, if it has one.
///
/// Strings and numbers are accepted; the value is trimmed and upper-cased.
fn classification(node: &Node, label_field: &str) -> Option<String> {
    let raw = match node.attribute(label_field)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let key = raw.trim().to_uppercase();
    (!key.is_empty()).then_some(key)
}

/// Build a supergraph grouped by the selected schema labels.
///
/// Returns only supernodes that received at least one child, plus the links
/// whose both endpoints fall inside some supernode. Kept links are copies
/// redirected to the supernode ids, typed `superLink`, with the original
/// endpoints recorded in `sourceID`/`targetID`.
pub fn schema_graph(
    nodes: &[Node],
    links: &[Link],
    selected_labels: &[String],
    schema: &SchemaTable,
    label_field: &str,
    config: &AggregationConfig,
) -> Graph {
    // Stub order: selected labels as given (deduplicated), then the catch-all
    let mut labels: Vec<&str> = Vec::new();
    for label in selected_labels
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(config.catch_all_label.as_str()))
    {
        if !labels.contains(&label) {
            labels.push(label);
        }
    }

    let mut supernodes: Vec<Node> = labels
        .iter()
        .map(|label| {
            Node::supernode(
                config.supernode_id(label),
                Vec::new(),
                json!({ "Label": label, "_key": label }),
            )
        })
        .collect();
    let slots: HashMap<&str, usize> = labels
        .iter()
        .enumerate()
        .map(|(slot, label)| (*label, slot))
        .collect();

    let selected: HashSet<&str> = selected_labels.iter().map(String::as_str).collect();
    let catch_all = slots[config.catch_all_label.as_str()];
    let mut unclassified = 0usize;

    for node in nodes {
        let Some(key) = classification(node, label_field) else {
            unclassified += 1;
            continue;
        };

        let slot = match resolve_lineage(&key, &selected, schema, config) {
            LineageOutcome::Resolved(label) => {
                slots.get(label.as_str()).copied().unwrap_or(catch_all)
            }
            LineageOutcome::Unresolved => {
                tracing::debug!(
                    "Classification '{}' of node '{}' did not resolve, using '{}'",
                    key,
                    node.id,
                    config.catch_all_label
                );
                catch_all
            }
        };

        if let Some(children) = supernodes[slot].children.as_mut() {
            children.push(node.id.clone());
        }
    }

    supernodes.retain(|supernode| !supernode.children_ids().is_empty());

    let parents: HashMap<&str, &str> = supernodes
        .iter()
        .flat_map(|supernode| {
            supernode
                .children_ids()
                .iter()
                .map(move |child| (child.as_str(), supernode.id.as_str()))
        })
        .collect();

    let schema_links: Vec<Link> = links
        .iter()
        .filter_map(|link| {
            let from = *parents.get(link.from.as_str())?;
            let to = *parents.get(link.to.as_str())?;

            let mut copy = link.clone();
            copy.source_id = Some(link.from.clone());
            copy.target_id = Some(link.to.clone());
            copy.link_type = Some(LinkKind::SuperLink);
            copy.redirect_from(from);
            copy.redirect_to(to);
            Some(copy)
        })
        .collect();

    let mut final_nodes = supernodes;
    define_neighbors(&mut final_nodes, &schema_links);

    tracing::debug!(
        "Schema aggregation on '{}': {} nodes ({} unclassified) -> {} supernodes, {} of {} links kept",
        label_field,
        nodes.len(),
        unclassified,
        final_nodes.len(),
        schema_links.len(),
        links.len()
    );

    Graph::new(final_nodes, schema_links)
}

// Comprehensive tests in separate module
#[cfg(test)]
#[path = "schema_aggregation_test.rs"]
mod schema_aggregation_test;
