//! The tick: select the currently-valid reading per site and push it.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use reading_store::ReadingStore;
use subscription_service::{NotificationSink, SnapshotRecord};

use crate::clock::SimulationClock;
use crate::config::PusherConfig;
use crate::metrics::{TickMetrics, TickMetricsSnapshot};

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    /// Simulated time the tick evaluated (read before the advance)
    pub sim_time: DateTime<Utc>,
    /// Records included in the snapshot
    pub records: usize,
    /// Whether a dispatch call was issued
    pub dispatched: bool,
}

/// Periodic evaluator of the simulated clock against all site timelines.
///
/// Each tick reads "now" once, collects the nearest reading per site,
/// keeps only those within the tolerance window (sites whose closest
/// reading falls outside are silently omitted — they currently have no
/// fresh data), hands any non-empty snapshot to the notification sink,
/// and finally advances the clock by the configured step.
pub struct LivePusher {
    store: Arc<ReadingStore>,
    clock: Arc<SimulationClock>,
    sink: Arc<dyn NotificationSink>,
    config: PusherConfig,
    metrics: TickMetrics,
}

impl LivePusher {
    pub fn new(
        store: Arc<ReadingStore>,
        clock: Arc<SimulationClock>,
        sink: Arc<dyn NotificationSink>,
        config: PusherConfig,
    ) -> Self {
        Self { store, clock, sink, config, metrics: TickMetrics::new() }
    }

    /// Run one tick. The clock advance is unconditional: it happens
    /// whether or not any data was found or dispatched, and dispatch
    /// failures never delay it (the sink owns its failure handling).
    pub async fn tick(&self) -> TickSummary {
        let started = Instant::now();
        let sim_time = self.clock.now();
        let tolerance_ms = self.config.tolerance().num_milliseconds();

        let mut records = Vec::new();
        match self.store.nearest_at(sim_time) {
            Ok(nearest) => {
                for (site_code, reading) in &nearest {
                    let distance = (reading.last_updated - sim_time).num_milliseconds().abs();
                    if distance <= tolerance_ms {
                        records.push(SnapshotRecord::from_reading(site_code, reading));
                    }
                }
            }
            Err(e) => warn!("Tick could not read the site store: {e}"),
        }

        info!("Pushing data at {} with {} records.", sim_time.to_rfc3339(), records.len());

        let dispatched = !records.is_empty();
        if dispatched {
            self.sink.deliver(&self.config.subscription_type, &records).await;
        }

        self.clock.advance(self.config.step());
        self.metrics.record_tick(records.len(), started.elapsed());

        TickSummary { sim_time, records: records.len(), dispatched }
    }

    /// The clock this pusher advances; shared with anything that reads or
    /// overrides simulated time.
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn config(&self) -> &PusherConfig {
        &self.config
    }

    pub fn metrics(&self) -> TickMetricsSnapshot {
        self.metrics.snapshot()
    }
}
