//! Graph Aggregation Operations
//!
//! Pure functions over copied node/link lists. None of them keep state
//! between calls or mutate their inputs.
//!
//! - [`super_graph`] - Group a flat graph by one attribute
//! - [`schema_graph`] - Group a flat graph by classification hierarchy
//! - [`expand_super_network`] / [`retract_super_network`] - Toggle one supernode
//! - [`define_neighbors`] - Rebuild adjacency from a link list
//! - [`validate_graph`] - Boundary consistency check

pub mod attribute_aggregation;
pub mod error;
pub mod expansion;
pub mod neighbors;
pub mod records;
pub mod schema_aggregation;
pub mod validation;

// Re-export operations for convenience
pub use attribute_aggregation::super_graph;
pub use error::InconsistentGraphError;
pub use expansion::{expand_super_network, retract_super_network};
pub use neighbors::define_neighbors;
pub use records::{process_child_links, process_child_nodes};
pub use schema_aggregation::{resolve_lineage, schema_graph, LineageOutcome};
pub use validation::validate_graph;
