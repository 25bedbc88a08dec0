//! Supergraph Aggregation Engine
//!
//! This crate collapses a flat node/link graph into supernodes and expands or
//! retracts those supernodes one at a time while keeping display order stable
//! and adjacency consistent.
//!
//! # Architecture
//!
//! - **Flat graph is the source of truth**: aggregated graphs are derived from it and
//!   every expand/retract reads children back from it
//! - **Copy at every boundary**: operations never mutate caller-owned records
//! - **Derived adjacency**: `neighbors` is always recomputed from the link list
//! - **Wire compatible**: records serialize with the `_from`/`_to`/`CHILDREN` field names
//!   used by the rendering layer
//!
//! # Modules
//!
//! - [`models`] - Graph records (Node, Link, Graph) and the schema hierarchy table
//! - [`operations`] - Pure aggregation, expansion and neighbor resolution functions
//! - [`services`] - `GraphAggregationService` facade with input validation and logging
//! - [`config`] - Aggregation tuning knobs (supernode prefix, lineage depth, ...)

pub mod config;
pub mod models;
pub mod operations;
pub mod services;

// Re-export commonly used types
pub use config::AggregationConfig;
pub use models::*;
pub use services::*;
