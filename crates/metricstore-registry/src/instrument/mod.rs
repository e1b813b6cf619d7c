//! Instruments handed out by a [`crate::MetricGroup`].
//!
//! Each handle is cheap to clone and shares state with every other clone.
//! A handle built with `noop()` discards all updates; excluded metric
//! groups hand those out.

pub mod counter;
pub mod gauge;
pub mod histogram;
pub mod sample;

pub use counter::Counter;
pub use gauge::Gauge;
pub use histogram::{Histogram, HistogramSnapshot};
pub use sample::{UniformSample, DEFAULT_SAMPLE_SIZE};

/// Instrument discriminant, used for logging and kind checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentKind {
    Counter,
    Gauge,
    Histogram,
}

impl InstrumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InstrumentKind::Counter => "counter",
            InstrumentKind::Gauge => "gauge",
            InstrumentKind::Histogram => "histogram",
        }
    }
}

/// A registered instrument, as seen by [`crate::MetricGroup::each`].
#[derive(Debug, Clone)]
pub enum Instrument {
    Counter(Counter),
    Gauge(Gauge),
    Histogram(Histogram),
}

impl Instrument {
    pub fn kind(&self) -> InstrumentKind {
        match self {
            Instrument::Counter(_) => InstrumentKind::Counter,
            Instrument::Gauge(_) => InstrumentKind::Gauge,
            Instrument::Histogram(_) => InstrumentKind::Histogram,
        }
    }

    pub fn as_counter(&self) -> Option<&Counter> {
        match self {
            Instrument::Counter(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_gauge(&self) -> Option<&Gauge> {
        match self {
            Instrument::Gauge(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_histogram(&self) -> Option<&Histogram> {
        match self {
            Instrument::Histogram(h) => Some(h),
            _ => None,
        }
    }
}
