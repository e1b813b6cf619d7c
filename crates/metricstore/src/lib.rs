//! Top-level facade crate for metricstore.
//!
//! Re-exports core types and the registry so users can depend on a single crate.

pub mod core {
    pub use metricstore_core::*;
}

pub mod registry {
    pub use metricstore_registry::*;
}

pub use metricstore_core::{LabelSet, MetricsError, Result};
pub use metricstore_registry::{global, MetricGroup, Registry};
