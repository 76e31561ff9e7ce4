//! The simulated clock: a single monotonically-advancing timestamp.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};

/// The engine's notion of "now", independent of wall-clock time.
///
/// Stored as atomic epoch-milliseconds so reads, explicit sets and tick
/// advances are each a single logical step; no caller can observe a
/// half-written value. The clock only moves through [`advance`] (one tick
/// step) or [`set`] (an explicit absolute override), which takes effect
/// for the very next tick.
///
/// [`advance`]: SimulationClock::advance
/// [`set`]: SimulationClock::set
pub struct SimulationClock {
    now_ms: AtomicI64,
}

impl SimulationClock {
    /// Create a clock starting at the configured simulation epoch.
    pub fn new(epoch: DateTime<Utc>) -> Self {
        Self { now_ms: AtomicI64::new(epoch.timestamp_millis()) }
    }

    /// Current simulated timestamp.
    pub fn now(&self) -> DateTime<Utc> {
        // The stored value always originates from timestamp_millis(), so
        // it is in range for chrono.
        DateTime::from_timestamp_millis(self.now_ms.load(Ordering::SeqCst)).unwrap_or_default()
    }

    /// Override the simulated time with an absolute value.
    pub fn set(&self, timestamp: DateTime<Utc>) {
        self.now_ms.store(timestamp.timestamp_millis(), Ordering::SeqCst);
    }

    /// Move the simulated time forward by `step`.
    pub fn advance(&self, step: Duration) {
        self.now_ms.fetch_add(step.num_milliseconds(), Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn starts_at_the_epoch() {
        let epoch = Utc.with_ymd_and_hms(2025, 5, 19, 0, 0, 0).unwrap();
        let clock = SimulationClock::new(epoch);
        assert_eq!(clock.now(), epoch);
    }

    #[test]
    fn advances_by_the_given_step() {
        let epoch = Utc.with_ymd_and_hms(2025, 5, 19, 0, 0, 0).unwrap();
        let clock = SimulationClock::new(epoch);

        clock.advance(Duration::seconds(60));
        clock.advance(Duration::seconds(60));
        assert_eq!(clock.now(), epoch + Duration::seconds(120));
    }

    #[test]
    fn set_overrides_absolutely() {
        let clock = SimulationClock::new(Utc.with_ymd_and_hms(2025, 5, 19, 0, 0, 0).unwrap());
        let target = Utc.with_ymd_and_hms(2025, 5, 19, 18, 30, 0).unwrap();

        clock.set(target);
        assert_eq!(clock.now(), target);
    }
}
