use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Monotonic-by-convention signed counter.
#[derive(Debug, Clone)]
pub struct Counter {
    inner: Option<Arc<AtomicI64>>, // None => discard
}

impl Counter {
    pub(crate) fn new() -> Self {
        Self {
            inner: Some(Arc::new(AtomicI64::new(0))),
        }
    }

    /// Counter that drops every update and always reads 0.
    pub fn noop() -> Self {
        Self { inner: None }
    }

    pub fn is_noop(&self) -> bool {
        self.inner.is_none()
    }

    pub fn inc(&self, n: i64) {
        if let Some(c) = &self.inner {
            c.fetch_add(n, Ordering::Relaxed);
        }
    }

    pub fn dec(&self, n: i64) {
        if let Some(c) = &self.inner {
            c.fetch_sub(n, Ordering::Relaxed);
        }
    }

    pub fn count(&self) -> i64 {
        self.inner.as_ref().map_or(0, |c| c.load(Ordering::Relaxed))
    }

    pub fn clear(&self) {
        if let Some(c) = &self.inner {
            c.store(0, Ordering::Relaxed);
        }
    }

    /// True when both handles point at the same underlying counter.
    pub fn same_as(&self, other: &Counter) -> bool {
        match (&self.inner, &other.inner) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
