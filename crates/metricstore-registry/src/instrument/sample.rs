//! Uniform reservoir sample backing histograms.
//!
//! Vitter's Algorithm R: the first `size` observations are kept as-is; after
//! that, observation `n` replaces a random slot with probability `size / n`.
//! The retained set is a uniform sample of everything seen, never more than
//! `size` values.

use rand::Rng;

/// Reservoir capacity used by [`crate::MetricGroup::histogram`].
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct UniformSample {
    size: usize,
    count: u64,
    values: Vec<i64>,
}

impl UniformSample {
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            count: 0,
            values: Vec::with_capacity(size),
        }
    }

    pub fn update(&mut self, v: i64) {
        self.count += 1;
        if self.values.len() < self.size {
            self.values.push(v);
            return;
        }

        let r = rand::thread_rng().gen_range(0..self.count);
        if let Ok(slot) = usize::try_from(r) {
            if slot < self.values.len() {
                self.values[slot] = v;
            }
        }
    }

    /// Total observations, including evicted ones.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn clear(&mut self) {
        self.count = 0;
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_then_stays_bounded() {
        let mut s = UniformSample::new(100);
        for i in 0..50 {
            s.update(i);
        }
        assert_eq!(s.len(), 50);
        assert_eq!(s.values(), (0..50).collect::<Vec<_>>().as_slice());

        for i in 50..1000 {
            s.update(i);
            assert!(s.len() <= 100);
        }
        assert_eq!(s.len(), 100);
        assert_eq!(s.count(), 1000);
        assert!(s.values().iter().all(|v| (0..1000).contains(v)));
    }

    #[test]
    fn zero_size_is_clamped() {
        let mut s = UniformSample::new(0);
        s.update(1);
        s.update(2);
        assert_eq!(s.size(), 1);
        assert_eq!(s.len(), 1);
    }
}
