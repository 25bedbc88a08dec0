//! Boundary validation for caller-supplied graphs
//!
//! The operations assume every link endpoint resolves within the node list it
//! travels with. `validate_graph` checks that before any work happens so an
//! inconsistent pair fails loudly instead of yielding dangling references.

use crate::models::{Link, Node};
use crate::operations::error::InconsistentGraphError;
use std::collections::HashSet;

/// Check node ids are unique and every link endpoint resolves.
///
/// Reports the first problem found, scanning nodes before links.
pub fn validate_graph(nodes: &[Node], links: &[Link]) -> Result<(), InconsistentGraphError> {
    let mut ids: HashSet<&str> = HashSet::with_capacity(nodes.len());
    for node in nodes {
        if !ids.insert(node.id.as_str()) {
            return Err(InconsistentGraphError::duplicate_node_id(node.id.clone()));
        }
    }

    for link in links {
        for endpoint in [&link.from, &link.to] {
            if !ids.contains(endpoint.as_str()) {
                return Err(InconsistentGraphError::dangling_link(
                    link.from.clone(),
                    link.to.clone(),
                    endpoint.clone(),
                ));
            }
        }
    }

    Ok(())
}
