//! Per-identity instrument container.
//!
//! A [`MetricGroup`] owns the instruments for one `(type, labels)` identity.
//! Instruments are created on first request and cached by name; asking for
//! the same name again returns a handle to the same state.

use std::sync::OnceLock;

use dashmap::DashMap;
use metricstore_core::{LabelSet, SortedLabels};

use crate::instrument::{
    Counter, Gauge, Histogram, Instrument, InstrumentKind, UniformSample, DEFAULT_SAMPLE_SIZE,
};

enum Instruments {
    Tracked(DashMap<String, Instrument>),
    /// Excluded by policy: every accessor hands out a no-op.
    Discard,
}

pub struct MetricGroup {
    typ: String,
    labels: LabelSet,
    identity: String,
    sorted: OnceLock<SortedLabels>,
    instruments: Instruments,
}

impl std::fmt::Debug for MetricGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricGroup")
            .field("typ", &self.typ)
            .field("identity", &self.identity)
            .field("noop", &self.is_noop())
            .field("instruments", &self.len())
            .finish()
    }
}

impl MetricGroup {
    pub(crate) fn new(typ: &str, labels: LabelSet, identity: String) -> Self {
        Self {
            typ: typ.to_string(),
            labels,
            identity,
            sorted: OnceLock::new(),
            instruments: Instruments::Tracked(DashMap::new()),
        }
    }

    /// Group returned for excluded metrics. Never stored in a registry.
    pub(crate) fn noop(typ: &str, labels: LabelSet) -> Self {
        let identity = metricstore_core::identity(typ, &labels);
        Self {
            typ: typ.to_string(),
            labels,
            identity,
            sorted: OnceLock::new(),
            instruments: Instruments::Discard,
        }
    }

    pub fn typ(&self) -> &str {
        &self.typ
    }

    /// Labels exactly as the creator supplied them.
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Dedup key this group was registered under.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn is_noop(&self) -> bool {
        matches!(self.instruments, Instruments::Discard)
    }

    /// Sorted keys and values, computed on first call.
    pub fn sorted_labels(&self) -> &SortedLabels {
        self.sorted.get_or_init(|| self.labels.sorted())
    }

    pub fn counter(&self, name: &str) -> Counter {
        match self.get_or_register(name, InstrumentKind::Counter) {
            Some(Instrument::Counter(c)) => c,
            _ => Counter::noop(),
        }
    }

    pub fn gauge(&self, name: &str) -> Gauge {
        match self.get_or_register(name, InstrumentKind::Gauge) {
            Some(Instrument::Gauge(g)) => g,
            _ => Gauge::noop(),
        }
    }

    /// Histogram backed by a uniform sample of [`DEFAULT_SAMPLE_SIZE`] values.
    pub fn histogram(&self, name: &str) -> Histogram {
        match self.get_or_register(name, InstrumentKind::Histogram) {
            Some(Instrument::Histogram(h)) => h,
            _ => Histogram::noop(),
        }
    }

    /// Visit every registered instrument.
    ///
    /// Iterates a snapshot, so `visit` may register new instruments on this
    /// group; those are not guaranteed to be visited.
    pub fn each<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &Instrument),
    {
        let Instruments::Tracked(map) = &self.instruments else {
            return;
        };
        let snapshot: Vec<(String, Instrument)> = map
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        for (name, inst) in &snapshot {
            visit(name, inst);
        }
    }

    /// Drop every instrument from this group.
    pub fn clear(&self) {
        if let Instruments::Tracked(map) = &self.instruments {
            map.clear();
        }
    }

    pub fn len(&self) -> usize {
        match &self.instruments {
            Instruments::Tracked(map) => map.len(),
            Instruments::Discard => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `None` for no-op groups and on a kind mismatch.
    fn get_or_register(&self, name: &str, kind: InstrumentKind) -> Option<Instrument> {
        let Instruments::Tracked(map) = &self.instruments else {
            return None;
        };

        let existing = map.get(name).map(|r| r.value().clone());
        let inst = match existing {
            Some(inst) => inst,
            None => map
                .entry(name.to_string())
                .or_insert_with(|| {
                    tracing::debug!(identity=%self.identity, name=%name, kind=kind.as_str(), "instrument created");
                    new_instrument(kind)
                })
                .value()
                .clone(),
        };

        if inst.kind() != kind {
            tracing::warn!(
                identity=%self.identity,
                name=%name,
                registered=inst.kind().as_str(),
                requested=kind.as_str(),
                "instrument kind mismatch; returning no-op"
            );
            return None;
        }
        Some(inst)
    }
}

fn new_instrument(kind: InstrumentKind) -> Instrument {
    match kind {
        InstrumentKind::Counter => Instrument::Counter(Counter::new()),
        InstrumentKind::Gauge => Instrument::Gauge(Gauge::new()),
        InstrumentKind::Histogram => {
            Instrument::Histogram(Histogram::with_sample(UniformSample::new(DEFAULT_SAMPLE_SIZE)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> MetricGroup {
        let labels = LabelSet::from([("zone", "a"), ("app", "web")]);
        let id = metricstore_core::identity("http", &labels);
        MetricGroup::new("http", labels, id)
    }

    #[test]
    fn same_name_same_instrument() {
        let g = group();
        let c1 = g.counter("hits");
        c1.inc(3);
        let c2 = g.counter("hits");
        assert!(c1.same_as(&c2));
        assert_eq!(c2.count(), 3);

        assert!(g.gauge("inflight").same_as(&g.gauge("inflight")));
        assert!(g.histogram("latency").same_as(&g.histogram("latency")));
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn kind_mismatch_returns_noop() {
        let g = group();
        g.counter("x").inc(1);

        let h = g.histogram("x");
        assert!(h.is_noop());
        assert_eq!(g.counter("x").count(), 1);
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn sorted_labels_cached() {
        let g = group();
        let a = g.sorted_labels() as *const SortedLabels;
        let b = g.sorted_labels() as *const SortedLabels;
        assert_eq!(a, b);
        assert_eq!(g.sorted_labels().keys, vec!["app", "zone"]);
        assert_eq!(g.identity(), "http.app.web.zone.a");
    }

    #[test]
    fn each_visits_all_and_tolerates_registration() {
        let g = group();
        g.counter("a");
        g.gauge("b");
        g.histogram("c");

        let mut seen = Vec::new();
        g.each(|name, inst| {
            seen.push((name.to_string(), inst.kind()));
            g.counter(&format!("{name}-new"));
        });
        seen.sort_by(|x, y| x.0.cmp(&y.0));

        assert_eq!(
            seen,
            vec![
                ("a".to_string(), InstrumentKind::Counter),
                ("b".to_string(), InstrumentKind::Gauge),
                ("c".to_string(), InstrumentKind::Histogram),
            ]
        );
        assert_eq!(g.len(), 6);
    }

    #[test]
    fn clear_drops_instruments() {
        let g = group();
        g.counter("a").inc(1);
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.counter("a").count(), 0);
    }

    #[test]
    fn noop_group_discards() {
        let g = MetricGroup::noop("http", LabelSet::from([("env", "prod")]));
        let c = g.counter("hits");
        c.inc(10);
        assert!(c.is_noop());
        assert!(g.gauge("g").is_noop());
        assert!(g.histogram("h").is_noop());
        assert_eq!(g.counter("hits").count(), 0);

        let mut visited = 0;
        g.each(|_, _| visited += 1);
        assert_eq!(visited, 0);
        g.clear();
        assert!(g.is_noop());
        assert_eq!(g.typ(), "http");
        assert_eq!(g.labels().get("env"), Some("prod"));
    }
}
