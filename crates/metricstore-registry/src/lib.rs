//! metricstore registry library entry.
//!
//! This crate wires label identity, the exclusion policy, and per-identity
//! instrument containers into a deduplicating, thread-safe registry. Host
//! code asks for a [`MetricGroup`] by `(type, labels)` and then pulls named
//! counters, gauges, and histograms from it.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod group;
pub mod instrument;
pub mod policy;
pub mod registry;

pub use group::MetricGroup;
pub use instrument::{Counter, Gauge, Histogram, HistogramSnapshot, Instrument, InstrumentKind};
pub use policy::{ExclusionPolicy, PolicyDecision};
pub use registry::{global, Registry};
