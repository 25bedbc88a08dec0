//! Service Layer Error Types
//!
//! This module defines the error type returned by `GraphAggregationService`
//! and the config loaders.

use crate::operations::InconsistentGraphError;
use thiserror::Error;

/// Aggregation service errors
#[derive(Error, Debug)]
pub enum AggregationError {
    /// Caller supplied a graph that fails boundary validation
    #[error("Inconsistent graph: {0}")]
    InconsistentGraph(#[from] InconsistentGraphError),

    /// Configuration rejected by `AggregationConfig::validate`
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AggregationError {
    /// Create a ConfigError
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AggregationError>;
