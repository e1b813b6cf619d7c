use std::sync::{Arc, Mutex, PoisonError};

use super::sample::UniformSample;

/// Histogram summarised by a uniform reservoir sample.
#[derive(Debug, Clone)]
pub struct Histogram {
    inner: Option<Arc<Mutex<UniformSample>>>, // None => discard
}

/// Point-in-time copy of a histogram's sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistogramSnapshot {
    /// Total observations, including ones evicted from the reservoir.
    pub count: u64,
    /// Retained sample values.
    pub values: Vec<i64>,
}

impl HistogramSnapshot {
    pub fn min(&self) -> Option<i64> {
        self.values.iter().copied().min()
    }

    pub fn max(&self) -> Option<i64> {
        self.values.iter().copied().max()
    }

    pub fn sum(&self) -> i64 {
        self.values.iter().fold(0i64, |acc, v| acc.saturating_add(*v))
    }

    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().map(|v| *v as f64).sum::<f64>() / self.values.len() as f64
    }
}

impl Histogram {
    pub(crate) fn with_sample(sample: UniformSample) -> Self {
        Self {
            inner: Some(Arc::new(Mutex::new(sample))),
        }
    }

    /// Histogram that drops every observation.
    pub fn noop() -> Self {
        Self { inner: None }
    }

    pub fn is_noop(&self) -> bool {
        self.inner.is_none()
    }

    pub fn update(&self, v: i64) {
        if let Some(s) = &self.inner {
            // Poisoned lock: the reservoir is still valid, keep sampling.
            s.lock().unwrap_or_else(PoisonError::into_inner).update(v);
        }
    }

    pub fn count(&self) -> u64 {
        self.inner
            .as_ref()
            .map_or(0, |s| s.lock().unwrap_or_else(PoisonError::into_inner).count())
    }

    /// Number of values currently held in the reservoir.
    pub fn sample_len(&self) -> usize {
        self.inner
            .as_ref()
            .map_or(0, |s| s.lock().unwrap_or_else(PoisonError::into_inner).len())
    }

    pub fn snapshot(&self) -> HistogramSnapshot {
        let Some(s) = &self.inner else {
            return HistogramSnapshot::default();
        };
        let g = s.lock().unwrap_or_else(PoisonError::into_inner);
        HistogramSnapshot {
            count: g.count(),
            values: g.values().to_vec(),
        }
    }

    pub fn clear(&self) {
        if let Some(s) = &self.inner {
            s.lock().unwrap_or_else(PoisonError::into_inner).clear();
        }
    }

    pub fn same_as(&self, other: &Histogram) -> bool {
        match (&self.inner, &other.inner) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
