//! Model definitions for console metrics.
//!
//! This module provides the metric catalogue, the samples built from it, and
//! the traits that connect collectors to sample sinks.

pub mod metrics;
pub mod traits;
pub mod types;
pub mod utilities;

// Re-export commonly used items at the module level
pub use metrics::{MetricMapper, MetricSample};
pub use traits::{MetricCollector, SampleSink};
pub use types::{MetricKey, MetricKind, PowerElement};
pub use utilities::batch_collect_metrics;
