/// Configuration for supergraph aggregation
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::services::error::Result;

/// Upper bound for the lineage walk budget
/// Keeps a misconfigured table walk from degenerating into a full-chain scan
const MAX_LINEAGE_DEPTH: usize = 64;

/// Tuning knobs shared by every aggregation operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Prefix prepended to a group key to form a supernode id
    pub supernode_prefix: String,

    /// Label of the catch-all schema supernode for unresolved classifications
    pub catch_all_label: String,

    /// Number of parent hops the lineage walk may take before giving up
    pub max_lineage_depth: usize,

    /// Characters compared when fuzzy matching an unknown classification key
    pub fuzzy_prefix_len: usize,

    /// Reject inconsistent graphs (dangling links, duplicate ids) at the service boundary
    pub validate_inputs: bool,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            supernode_prefix: "supernodes/".to_string(),
            catch_all_label: "Null".to_string(),
            max_lineage_depth: 5,
            fuzzy_prefix_len: 3,
            validate_inputs: true,
        }
    }
}

impl AggregationConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Supernode id for a group key
    pub fn supernode_id(&self, group_key: &str) -> String {
        format!("{}{}", self.supernode_prefix, group_key)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.supernode_prefix.is_empty() {
            return Err("supernode_prefix cannot be empty".to_string());
        }

        if self.catch_all_label.trim().is_empty() {
            return Err("catch_all_label cannot be empty".to_string());
        }

        if self.max_lineage_depth == 0 {
            return Err("max_lineage_depth must be greater than 0".to_string());
        }

        if self.max_lineage_depth > MAX_LINEAGE_DEPTH {
            return Err(format!(
                "max_lineage_depth cannot exceed {}",
                MAX_LINEAGE_DEPTH
            ));
        }

        if self.fuzzy_prefix_len == 0 {
            return Err("fuzzy_prefix_len must be greater than 0".to_string());
        }

        Ok(())
    }
}
