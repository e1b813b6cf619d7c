//! metricstore core: label sets, metric identity, and the shared error surface.
//!
//! This crate defines how a `(type, labels)` pair is turned into a stable
//! identity string and which errors the registry can report. It carries no
//! locking or runtime dependencies so exporters can depend on it alone.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `MetricsError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod labels;

/// Shared result type.
pub use error::{ErrorCode, MetricsError, Result};
pub use labels::{identity, LabelSet, SortedLabels, MAX_LABELS};
