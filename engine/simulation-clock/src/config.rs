//! Configuration for the simulated clock and pusher.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_CADENCE_SECS, DEFAULT_STEP_SECS, DEFAULT_TOLERANCE_SECS};
use subscription_service::AIR_QUALITY_DYNAMIC;

/// Configuration for the tick/push cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PusherConfig {
    /// Simulated epoch the clock starts from
    pub epoch: DateTime<Utc>,

    /// Simulated seconds the clock advances after each tick
    pub step_secs: u64,

    /// Maximum seconds between "now" and a site's nearest reading for the
    /// reading to be included in the snapshot
    pub tolerance_secs: u64,

    /// Wall-clock seconds between scheduled ticks
    pub cadence_secs: u64,

    /// Subscription-type tag stamped on outgoing pushes
    pub subscription_type: String,
}

impl Default for PusherConfig {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            step_secs: DEFAULT_STEP_SECS,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
            cadence_secs: DEFAULT_CADENCE_SECS,
            subscription_type: AIR_QUALITY_DYNAMIC.to_string(),
        }
    }
}

impl PusherConfig {
    /// Clock step as simulated-time duration.
    pub fn step(&self) -> Duration {
        Duration::seconds(self.step_secs as i64)
    }

    /// Tolerance window as simulated-time duration.
    pub fn tolerance(&self) -> Duration {
        Duration::seconds(self.tolerance_secs as i64)
    }

    /// Scheduler cadence as wall-clock duration.
    pub fn cadence(&self) -> StdDuration {
        StdDuration::from_secs(self.cadence_secs)
    }
}

/// Start of the replayed catalogue window.
pub fn default_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 19, 0, 0, 0).unwrap()
}
