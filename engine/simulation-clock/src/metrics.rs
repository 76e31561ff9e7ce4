//! Lightweight tick metrics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Counters accumulated across ticks.
#[derive(Default)]
pub struct TickMetrics {
    ticks_processed: AtomicU64,
    records_pushed: AtomicU64,
    empty_ticks: AtomicU64,
    last_tick_duration_us: AtomicU64,
}

/// Point-in-time view of the tick counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickMetricsSnapshot {
    pub ticks_processed: u64,
    pub records_pushed: u64,
    pub empty_ticks: u64,
    pub last_tick_duration_us: u64,
}

impl TickMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_tick(&self, records: usize, duration: Duration) {
        self.ticks_processed.fetch_add(1, Ordering::Relaxed);
        if records == 0 {
            self.empty_ticks.fetch_add(1, Ordering::Relaxed);
        } else {
            self.records_pushed.fetch_add(records as u64, Ordering::Relaxed);
        }
        self.last_tick_duration_us.store(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> TickMetricsSnapshot {
        TickMetricsSnapshot {
            ticks_processed: self.ticks_processed.load(Ordering::Relaxed),
            records_pushed: self.records_pushed.load(Ordering::Relaxed),
            empty_ticks: self.empty_ticks.load(Ordering::Relaxed),
            last_tick_duration_us: self.last_tick_duration_us.load(Ordering::Relaxed),
        }
    }
}
