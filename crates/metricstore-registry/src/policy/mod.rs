//! Policy layer (metric exclusion).
//!
//! Decides, per `get_or_create` request, whether a metric is tracked in the
//! registry or handed out as a discarding no-op.

pub mod exclusion;

pub use exclusion::{ExclusionPolicy, PolicyDecision};
