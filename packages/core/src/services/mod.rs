//! Business Services
//!
//! This module contains the service layer consumed by the rendering layer:
//!
//! - `GraphAggregationService` - Validated entry points for aggregation,
//!   expansion and retraction
//! - `AggregationError` - Service-level error type

pub mod aggregation_service;
pub mod error;

pub use aggregation_service::GraphAggregationService;
pub use error::{AggregationError, Result};
