//! Unit tests for clock configuration and metrics.

use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::config::default_epoch;
use crate::{
    PusherConfig, TickMetrics, DEFAULT_CADENCE_SECS, DEFAULT_STEP_SECS, DEFAULT_TOLERANCE_SECS,
};

mod config_tests {
    use super::*;

    #[test]
    fn defaults_match_the_crate_constants() {
        let config = PusherConfig::default();
        assert_eq!(config.step_secs, DEFAULT_STEP_SECS);
        assert_eq!(config.tolerance_secs, DEFAULT_TOLERANCE_SECS);
        assert_eq!(config.cadence_secs, DEFAULT_CADENCE_SECS);
        assert_eq!(config.epoch, default_epoch());
        assert_eq!(config.subscription_type, "AIR QUALITY DYNAMIC");
    }

    #[test]
    fn duration_conversions() {
        let config = PusherConfig::default();
        assert_eq!(config.step(), Duration::seconds(60));
        assert_eq!(config.tolerance(), Duration::seconds(10));
        assert_eq!(config.cadence(), StdDuration::from_secs(60));
    }

    #[test]
    fn config_round_trips_through_serde() {
        let config = PusherConfig { step_secs: 30, ..Default::default() };
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: PusherConfig = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.step_secs, 30);
        assert_eq!(deserialized.epoch, config.epoch);
        assert_eq!(deserialized.subscription_type, config.subscription_type);
    }
}

mod metrics_tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let metrics = TickMetrics::new();
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.ticks_processed, 0);
        assert_eq!(snapshot.records_pushed, 0);
        assert_eq!(snapshot.empty_ticks, 0);
    }

    #[test]
    fn records_pushed_and_empty_ticks() {
        let metrics = TickMetrics::new();
        metrics.record_tick(3, StdDuration::from_micros(250));
        metrics.record_tick(0, StdDuration::from_micros(90));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.ticks_processed, 2);
        assert_eq!(snapshot.records_pushed, 3);
        assert_eq!(snapshot.empty_ticks, 1);
        assert_eq!(snapshot.last_tick_duration_us, 90);
    }
}
