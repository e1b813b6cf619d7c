use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Point-in-time value; last write wins.
#[derive(Debug, Clone)]
pub struct Gauge {
    inner: Option<Arc<AtomicI64>>, // None => discard
}

impl Gauge {
    pub(crate) fn new() -> Self {
        Self {
            inner: Some(Arc::new(AtomicI64::new(0))),
        }
    }

    /// Gauge that drops every update and always reads 0.
    pub fn noop() -> Self {
        Self { inner: None }
    }

    pub fn is_noop(&self) -> bool {
        self.inner.is_none()
    }

    pub fn update(&self, v: i64) {
        if let Some(g) = &self.inner {
            g.store(v, Ordering::Relaxed);
        }
    }

    pub fn value(&self) -> i64 {
        self.inner.as_ref().map_or(0, |g| g.load(Ordering::Relaxed))
    }

    pub fn same_as(&self, other: &Gauge) -> bool {
        match (&self.inner, &other.inner) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
