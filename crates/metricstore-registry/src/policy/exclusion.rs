//! Exclusion policy: a sticky reject-all latch plus a set of label keys.

use std::collections::HashSet;

use metricstore_core::LabelSet;

/// Decision from policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Store the metric in the registry.
    Track,
    /// Hand out a no-op group; nothing is registered.
    Discard,
}

/// Process-wide exclusion state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionPolicy {
    reject_all: bool,
    excluded_keys: HashSet<String>,
}

impl ExclusionPolicy {
    /// Policy that tracks everything.
    pub fn accept_all() -> Self {
        Self::default()
    }

    pub fn reject_all(&self) -> bool {
        self.reject_all
    }

    pub fn excluded_keys(&self) -> &HashSet<String> {
        &self.excluded_keys
    }

    /// Replace the excluded keys. `reject_all` only ever latches on.
    pub fn apply<I, S>(&mut self, reject_all: bool, excluded_keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if reject_all {
            self.reject_all = true;
        }
        self.excluded_keys = excluded_keys.into_iter().map(Into::into).collect();
    }

    pub fn decide(&self, labels: &LabelSet) -> PolicyDecision {
        if self.reject_all {
            return PolicyDecision::Discard;
        }
        let hit = self.excluded_keys.iter().any(|k| labels.contains_key(k));
        if hit {
            PolicyDecision::Discard
        } else {
            PolicyDecision::Track
        }
    }

    pub fn excludes(&self, labels: &LabelSet) -> bool {
        self.decide(labels) == PolicyDecision::Discard
    }
}
