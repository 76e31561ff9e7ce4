//! Densifier: expand sparse discrete readings into a 10-second
//! interpolated timeline.

use chrono::Duration;
use site_catalogue::Reading;

/// Interpolation grid spacing in seconds.
pub const INTERPOLATION_STEP_SECS: i64 = 10;

/// Expand one site's raw reading sequence into a seconds-granular
/// timeline.
///
/// The input is stable-sorted by timestamp only, then every consecutive
/// pair is filled with entries every 10 seconds, each channel linearly
/// interpolated between the pair's values. The loop always emits the entry
/// at offset 0 (equal to the pair's first reading) and never emits one at
/// the second reading's timestamp; the final original reading is appended
/// exactly once, after all pairs, as the sequence's true tail.
///
/// Pure transform: the same input sequence always yields the same output.
pub fn densify(mut readings: Vec<Reading>) -> Vec<Reading> {
    readings.sort_by_key(|r| r.last_updated);

    let Some(tail) = readings.last().cloned() else {
        return Vec::new();
    };

    let mut dense = Vec::new();
    for pair in readings.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        let elapsed = (next.last_updated - current.last_updated).num_seconds();

        let mut offset = 0;
        while offset < elapsed {
            dense.push(interpolate_at(current, next, offset, elapsed));
            offset += INTERPOLATION_STEP_SECS;
        }
    }

    dense.push(tail);
    dense
}

fn interpolate_at(current: &Reading, next: &Reading, offset: i64, elapsed: i64) -> Reading {
    let fraction = offset as f64 / elapsed as f64;
    Reading {
        co: lerp(current.co, next.co, fraction),
        no: lerp(current.no, next.no, fraction),
        no2: lerp(current.no2, next.no2, fraction),
        rh: lerp(current.rh, next.rh, fraction),
        temperature: lerp(current.temperature, next.temperature, fraction),
        noise: lerp(current.noise, next.noise, fraction),
        battery: lerp(current.battery, next.battery, fraction),
        last_updated: current.last_updated + Duration::seconds(offset),
    }
}

/// Linear interpolation of one channel; a channel absent on either
/// endpoint stays absent in the interpolated entry.
fn lerp(start: Option<f64>, end: Option<f64>, fraction: f64) -> Option<f64> {
    match (start, end) {
        (Some(a), Some(b)) => Some(a + (b - a) * fraction),
        _ => None,
    }
}
