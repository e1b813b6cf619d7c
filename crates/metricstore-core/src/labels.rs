//! Label sets and identity computation.
//!
//! A [`LabelSet`] keeps the caller's mapping as given. Anything that needs a
//! stable representation goes through [`LabelSet::sorted`], which orders keys
//! lexicographically.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{MetricsError, Result};

/// Maximum number of labels a single metric may carry.
pub const MAX_LABELS: usize = 10;

/// Unordered label mapping (key -> value).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(HashMap<String, String>);

impl LabelSet {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Read-only view of the underlying map.
    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.0
    }

    /// Reject label sets larger than [`MAX_LABELS`].
    pub fn check_limit(&self) -> Result<()> {
        if self.0.len() > MAX_LABELS {
            return Err(MetricsError::LabelLimitExceeded {
                count: self.0.len(),
                max: MAX_LABELS,
            });
        }
        Ok(())
    }

    /// Canonical form: keys sorted lexicographically, values in matching order.
    pub fn sorted(&self) -> SortedLabels {
        let mut pairs: Vec<(&String, &String)> = self.0.iter().collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut keys = Vec::with_capacity(pairs.len());
        let mut values = Vec::with_capacity(pairs.len());
        for (k, v) in pairs {
            keys.push(k.clone());
            values.push(v.clone());
        }
        SortedLabels { keys, values }
    }
}

impl From<HashMap<String, String>> for LabelSet {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl From<&[(&str, &str)]> for LabelSet {
    fn from(pairs: &[(&str, &str)]) -> Self {
        pairs.iter().copied().collect()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for LabelSet {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Parallel key/value vectors in sorted-key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedLabels {
    pub keys: Vec<String>,
    pub values: Vec<String>,
}

impl SortedLabels {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys
            .iter()
            .zip(self.values.iter())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Dedup key for a metric: `typ` followed by `.<key>.<value>` per sorted label.
///
/// An empty label set yields `typ` unchanged.
pub fn identity(typ: &str, labels: &LabelSet) -> String {
    let sorted = labels.sorted();
    let extra: usize = sorted.iter().map(|(k, v)| k.len() + v.len() + 2).sum();

    let mut out = String::with_capacity(typ.len() + extra);
    out.push_str(typ);
    for (k, v) in sorted.iter() {
        out.push('.');
        out.push_str(k);
        out.push('.');
        out.push_str(v);
    }
    out
}
