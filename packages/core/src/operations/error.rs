//! Error types for graph boundary validation
//!
//! The aggregation operations themselves never fail: unknown ids are silent
//! no-ops and unmapped classifications fall back to the catch-all group. The
//! only hard failure is a caller handing over a graph that is internally
//! inconsistent, which this module describes.

use thiserror::Error;

/// Structural problems found in a caller-supplied graph
///
/// # Examples
///
/// ```rust
/// use supergraph_core::operations::InconsistentGraphError;
///
/// let err = InconsistentGraphError::DanglingLink {
///     from: "people/a".to_string(),
///     to: "people/z".to_string(),
///     missing: "people/z".to_string(),
/// };
/// assert!(err.to_string().contains("people/z"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InconsistentGraphError {
    /// Two records share one id
    #[error("Duplicate node id '{id}'")]
    DuplicateNodeId { id: String },

    /// A link endpoint does not resolve to any node in the accompanying list
    #[error("Link '{from}' -> '{to}' references missing node '{missing}'")]
    DanglingLink {
        from: String,
        to: String,
        missing: String,
    },
}

impl InconsistentGraphError {
    /// Create a DuplicateNodeId error
    pub fn duplicate_node_id(id: String) -> Self {
        Self::DuplicateNodeId { id }
    }

    /// Create a DanglingLink error
    pub fn dangling_link(from: String, to: String, missing: String) -> Self {
        Self::DanglingLink { from, to, missing }
    }
}
