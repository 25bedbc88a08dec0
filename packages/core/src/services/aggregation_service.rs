//! Graph Aggregation Service
//!
//! Entry point used by the rendering layer. The service owns a validated
//! [`AggregationConfig`], checks caller graphs at the boundary (when
//! `validate_inputs` is set) and delegates to the pure functions in
//! [`crate::operations`].
//!
//! # Examples
//!
//! ```rust
//! use supergraph_core::models::{Graph, Link, Node};
//! use supergraph_core::services::GraphAggregationService;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = GraphAggregationService::with_defaults();
//! let flat = Graph::new(
//!     vec![
//!         Node::new("a", json!({ "g": "X" })),
//!         Node::new("b", json!({ "g": "Y" })),
//!     ],
//!     vec![Link::new("a", "b")],
//! );
//!
//! let collapsed = service.build_attribute_supergraph(&flat, "g")?;
//! let expanded = service.expand(&flat, &collapsed, "supernodes/X")?.unwrap();
//! assert_eq!(expanded.node_ids(), vec!["supernodes/X", "a", "supernodes/Y"]);
//!
//! let again = service.retract(&flat, &expanded, "supernodes/X")?.unwrap();
//! assert_eq!(again, collapsed);
//! # Ok(())
//! # }
//! ```

use crate::config::AggregationConfig;
use crate::models::{Graph, SchemaTable};
use crate::operations::{
    expand_super_network, retract_super_network, schema_graph, super_graph, validate_graph,
};
use crate::services::error::{AggregationError, Result};

/// Facade over the aggregation operations
#[derive(Debug, Clone)]
pub struct GraphAggregationService {
    config: AggregationConfig,
}

impl GraphAggregationService {
    /// Create a service, rejecting invalid configuration
    pub fn new(config: AggregationConfig) -> Result<Self> {
        config.validate().map_err(AggregationError::config_error)?;
        Ok(Self { config })
    }

    /// Create a service with the default configuration
    pub fn with_defaults() -> Self {
        Self {
            config: AggregationConfig::default(),
        }
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Collapse `flat` into one supernode per distinct `attribute` value
    pub fn build_attribute_supergraph(&self, flat: &Graph, attribute: &str) -> Result<Graph> {
        self.check("flat", flat)?;

        let graph = super_graph(&flat.nodes, &flat.links, attribute, &self.config);

        tracing::info!(
            "Built attribute supergraph on '{}': {} supernodes, {} links",
            attribute,
            graph.nodes.len(),
            graph.links.len()
        );
        Ok(graph)
    }

    /// Collapse `flat` into the selected levels of a classification hierarchy
    ///
    /// # Arguments
    ///
    /// * `flat` - The non-aggregated graph
    /// * `selected_labels` - Hierarchy levels to group under
    /// * `schema` - Child key → parent key table
    /// * `label_field` - Node attribute holding the raw classification
    pub fn build_schema_supergraph(
        &self,
        flat: &Graph,
        selected_labels: &[String],
        schema: &SchemaTable,
        label_field: &str,
    ) -> Result<Graph> {
        self.check("flat", flat)?;

        let graph = schema_graph(
            &flat.nodes,
            &flat.links,
            selected_labels,
            schema,
            label_field,
            &self.config,
        );

        tracing::info!(
            "Built schema supergraph on '{}': {} supernodes, {} links",
            label_field,
            graph.nodes.len(),
            graph.links.len()
        );
        Ok(graph)
    }

    /// Expand one supernode of `aggregated`
    ///
    /// # Returns
    ///
    /// - `Ok(Some(graph))` - The new display composition
    /// - `Ok(None)` - No supernode with that id (nothing changed)
    /// - `Err(AggregationError::InconsistentGraph)` - An input failed validation
    pub fn expand(
        &self,
        flat: &Graph,
        aggregated: &Graph,
        supernode_id: &str,
    ) -> Result<Option<Graph>> {
        self.check("flat", flat)?;
        self.check("aggregated", aggregated)?;

        let graph = expand_super_network(
            &flat.nodes,
            &flat.links,
            &aggregated.nodes,
            &aggregated.links,
            supernode_id,
        );

        if graph.is_none() {
            tracing::info!("Expand of unknown supernode '{}' ignored", supernode_id);
        }
        Ok(graph)
    }

    /// Retract one expanded supernode of `aggregated`
    ///
    /// Same return convention as [`GraphAggregationService::expand`].
    pub fn retract(
        &self,
        flat: &Graph,
        aggregated: &Graph,
        supernode_id: &str,
    ) -> Result<Option<Graph>> {
        self.check("flat", flat)?;
        self.check("aggregated", aggregated)?;

        let graph = retract_super_network(
            &flat.nodes,
            &aggregated.nodes,
            &aggregated.links,
            supernode_id,
        );

        if graph.is_none() {
            tracing::info!("Retract of unknown supernode '{}' ignored", supernode_id);
        }
        Ok(graph)
    }

    fn check(&self, role: &str, graph: &Graph) -> Result<()> {
        if !self.config.validate_inputs {
            return Ok(());
        }

        validate_graph(&graph.nodes, &graph.links).map_err(|err| {
            tracing::warn!("Rejected {} graph: {}", role, err);
            AggregationError::from(err)
        })
    }
}

impl Default for GraphAggregationService {
    fn default() -> Self {
        Self::with_defaults()
    }
}
