//! Readings exchanged between the metric source and the sample loop.

use std::time::Instant;

/// Cumulative byte totals summed across all interfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetCounters {
    pub sent: u64,
    pub received: u64,
}

/// Network counters plus the moment they were read. Replaced whole each tick.
#[derive(Debug, Clone, Copy)]
pub struct CounterSnapshot {
    pub counters: NetCounters,
    pub taken_at: Instant,
}

impl CounterSnapshot {
    pub fn now(counters: NetCounters) -> Self {
        Self {
            counters,
            taken_at: Instant::now(),
        }
    }
}

/// Outcome of one read for one series on one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Fresh(f64),
    /// The read failed (or had no baseline); the series repeats its last value.
    Stale,
}

impl Reading {
    pub fn is_stale(&self) -> bool {
        matches!(self, Reading::Stale)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Fresh(v) => Some(*v),
            Reading::Stale => None,
        }
    }
}

impl<E> From<Result<f64, E>> for Reading {
    fn from(r: Result<f64, E>) -> Self {
        r.map(Reading::Fresh).unwrap_or(Reading::Stale)
    }
}

/// What a single tick pushed into each of the four series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub cpu: Reading,
    pub memory: Reading,
    pub net_sent: Reading,
    pub net_recv: Reading,
}

impl TickReport {
    pub fn stale_count(&self) -> usize {
        [self.cpu, self.memory, self.net_sent, self.net_recv]
            .iter()
            .filter(|r| r.is_stale())
            .count()
    }
}
