//! Data Models
//!
//! This module contains the records exchanged with the rendering layer:
//!
//! - `Node` / `Link` / `Graph` - Flat and aggregated graph records
//! - `SchemaTable` - Classification hierarchy used by schema aggregation
//!
//! Domain attributes are kept verbatim in each record's flattened
//! `properties` object, so records round-trip through JSON unchanged.

mod graph;
mod schema_table;

pub use graph::{group_key, Graph, Link, LinkKind, Node, NodeKind};
pub use schema_table::SchemaTable;
