//! Deduplicating metric registry.
//!
//! Maps the identity of a `(type, labels)` pair to exactly one
//! [`MetricGroup`]. Excluded requests get a no-op group that is never
//! stored, so exporters walking [`Registry::enumerate`] never see it.

use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use metricstore_core::{identity, LabelSet, Result};

use crate::config::{RegistryConfig, StatsMatcherConfig};
use crate::group::MetricGroup;
use crate::policy::{ExclusionPolicy, PolicyDecision};

/// Initial table capacity when none is configured.
pub const DEFAULT_CAPACITY: usize = 100;

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Process-wide default registry, created on first use.
///
/// Prefer passing a `&Registry` to consumers; this exists for call sites
/// that have no handle to thread through.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(Registry::new)
}

pub struct Registry {
    groups: DashMap<String, Arc<MetricGroup>>,
    // Held (read) across lookup-or-insert so policy changes and resets
    // never interleave with a create in flight.
    policy: RwLock<ExclusionPolicy>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("groups", &self.groups.len())
            .field("policy", &*self.read_policy())
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            groups: DashMap::with_capacity(capacity),
            policy: RwLock::new(ExclusionPolicy::accept_all()),
        }
    }

    /// Build a registry from validated config and apply its stats matcher.
    pub fn from_config(cfg: &RegistryConfig) -> Self {
        let reg = Self::with_capacity(cfg.registry.initial_capacity);
        reg.apply_stats_matcher(&cfg.stats_matcher);
        reg
    }

    /// Replace the excluded label keys.
    ///
    /// `reject_all = true` latches: later calls with `false` keep rejecting
    /// until [`Registry::reset_all`]. Existing groups are unaffected.
    pub fn set_exclusion_policy<I, S>(&self, reject_all: bool, excluded_keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut policy = self.write_policy();
        policy.apply(reject_all, excluded_keys);
        tracing::info!(
            reject_all = policy.reject_all(),
            excluded_keys = policy.excluded_keys().len(),
            "metrics exclusion policy updated"
        );
    }

    pub fn apply_stats_matcher(&self, cfg: &StatsMatcherConfig) {
        self.set_exclusion_policy(cfg.reject_all, cfg.exclusion_labels.iter().cloned());
    }

    /// Copy of the current exclusion policy.
    pub fn exclusion_policy(&self) -> ExclusionPolicy {
        self.read_policy().clone()
    }

    /// Look up the group for `(typ, labels)`, creating it if needed.
    ///
    /// Fails only when `labels` has more than [`metricstore_core::MAX_LABELS`]
    /// entries. Excluded requests succeed with a no-op group.
    pub fn get_or_create(&self, typ: &str, labels: LabelSet) -> Result<Arc<MetricGroup>> {
        if let Err(e) = labels.check_limit() {
            tracing::warn!(typ=%typ, labels=labels.len(), error=%e, "metric rejected");
            return Err(e);
        }

        let policy = self.read_policy();
        if policy.decide(&labels) == PolicyDecision::Discard {
            tracing::trace!(typ=%typ, "metric excluded by policy");
            return Ok(Arc::new(MetricGroup::noop(typ, labels)));
        }

        let id = identity(typ, &labels);
        if let Some(existing) = self.groups.get(&id) {
            return Ok(Arc::clone(existing.value()));
        }

        let group = match self.groups.entry(id) {
            Entry::Occupied(e) => Arc::clone(e.get()),
            Entry::Vacant(v) => {
                let group = Arc::new(MetricGroup::new(typ, labels, v.key().clone()));
                tracing::debug!(identity=%group.identity(), "metric group created");
                v.insert(Arc::clone(&group));
                group
            }
        };
        drop(policy);

        Ok(group)
    }

    /// Snapshot of every tracked group, in no particular order.
    pub fn enumerate(&self) -> Vec<Arc<MetricGroup>> {
        self.groups.iter().map(|r| Arc::clone(r.value())).collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Clear every group's instruments, drop all groups, and reset the policy.
    ///
    /// Test and admin use only. Callers must not run this concurrently with
    /// metric creation; handles obtained before the reset keep working but are
    /// no longer reachable from the registry.
    pub fn reset_all(&self) {
        let mut policy = self.write_policy();
        let dropped = self.groups.len();
        for r in self.groups.iter() {
            r.value().clear();
        }
        self.groups.clear();
        *policy = ExclusionPolicy::accept_all();
        tracing::info!(groups = dropped, "metrics registry reset");
    }

    // Every policy write is a single assignment; a poisoned lock still
    // holds a valid value.
    fn read_policy(&self) -> RwLockReadGuard<'_, ExclusionPolicy> {
        self.policy.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_policy(&self) -> RwLockWriteGuard<'_, ExclusionPolicy> {
        self.policy.write().unwrap_or_else(PoisonError::into_inner)
    }
}
