//! Generates the static input artifacts consumed by the AirWatch gateway:
//! a 24-hour pollution reading catalogue (10-minute sampling, busy-period
//! value ranges) and the site definition metadata.
//!
//! Usage: `site-seeder [output-dir]` (defaults to `data/`).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use rand::Rng;
use serde_json::{json, Value};

use site_catalogue::timefmt;

const NUM_SITES: usize = 130;
const INTERVAL_MINUTES: i64 = 10;
const POINTS_PER_DAY: i64 = 24 * 60 / INTERVAL_MINUTES;

/// Definition timestamp stamped on every metadata entry.
const METADATA_TIMESTAMP: &str = "2025-06-26T19:47:00.000+0000";

fn main() -> Result<()> {
    let out_dir = std::env::args().nth(1).unwrap_or_else(|| "data".to_string());
    fs::create_dir_all(&out_dir).with_context(|| format!("Failed to create {out_dir}"))?;

    let start_time = Utc.with_ymd_and_hms(2025, 5, 19, 0, 0, 0).unwrap();
    let mut rng = rand::thread_rng();

    let pollution_path = Path::new(&out_dir).join("pollution_data.json");
    let sites = generate_pollution_data(&mut rng, start_time);
    fs::write(&pollution_path, serde_json::to_string_pretty(&sites)?)
        .with_context(|| format!("Failed to write {}", pollution_path.display()))?;
    println!("JSON data successfully saved to {}", pollution_path.display());

    let metadata_path = Path::new(&out_dir).join("metadata.json");
    let metadata = generate_metadata(&mut rng);
    fs::write(&metadata_path, serde_json::to_string_pretty(&metadata)?)
        .with_context(|| format!("Failed to write {}", metadata_path.display()))?;
    println!("Site metadata successfully saved to {}", metadata_path.display());

    Ok(())
}

/// Morning and evening rush windows carry elevated pollutant and noise
/// levels.
fn is_busy_period(ts: DateTime<Utc>) -> bool {
    let hour = ts.hour();
    (8..9).contains(&hour) || (16..19).contains(&hour)
}

/// One day of readings for every site. Pollutant baselines taken from
/// Sunderland Wessington Way (no/no2) and Newcastle Centre historic (co)
/// monitoring data.
fn generate_pollution_data(rng: &mut impl Rng, start_time: DateTime<Utc>) -> Value {
    let mut sites = Vec::with_capacity(NUM_SITES);
    for site_num in 1..=NUM_SITES {
        let mut dynamics = Vec::with_capacity(POINTS_PER_DAY as usize);
        for i in 0..POINTS_PER_DAY {
            let current_time = start_time + Duration::minutes(i * INTERVAL_MINUTES);
            dynamics.push(generate_reading(rng, current_time));
        }
        sites.push(json!({
            "systemCodeNumber": site_code(site_num),
            "dynamics": dynamics,
        }));
    }
    Value::Array(sites)
}

fn generate_reading(rng: &mut impl Rng, current_time: DateTime<Utc>) -> Value {
    let busy = is_busy_period(current_time);

    let co = round_to(if busy { rng.gen_range(0.5..5.0) } else { rng.gen_range(0.1..0.17) }, 2);
    let no = round_to(if busy { rng.gen_range(20.0..150.0) } else { rng.gen_range(1.0..10.0) }, 2);
    let no2 = round_to(if busy { rng.gen_range(40.0..300.0) } else { rng.gen_range(5.0..30.0) }, 2);
    let noise =
        round_to(if busy { rng.gen_range(70.0..100.0) } else { rng.gen_range(30.0..60.0) }, 2);
    let rh: f64 = if busy { rng.gen_range(70.0..85.0) } else { rng.gen_range(55.0..59.9) };
    let rh = rh.round() as i64;

    // Temperature follows a coarse time-of-day band.
    let hour = current_time.hour();
    let temperature = if (10..18).contains(&hour) {
        round_to(rng.gen_range(18.0..24.0), 1)
    } else if !(6..22).contains(&hour) {
        round_to(rng.gen_range(5.0..10.0), 1)
    } else {
        round_to(rng.gen_range(7.0..17.0), 1)
    };

    let battery = round_to(rng.gen_range(3.5..4.2), 1);

    json!({
        "co": co,
        "no": no,
        "no2": no2,
        "rh": rh,
        "temperature": temperature,
        "noise": noise,
        "battery": battery,
        "lastUpdated": timefmt::format_timestamp(&current_time),
    })
}

/// One metadata entry per site with a resolved latitude/longitude point
/// inside the Tyne & Wear bounding box.
fn generate_metadata(rng: &mut impl Rng) -> Value {
    let mut sites = Vec::with_capacity(NUM_SITES);
    for site_num in 1..=NUM_SITES {
        let lat = round_to(rng.gen_range(54.90..55.05), 6);
        let lon = round_to(rng.gen_range(-1.75..-1.45), 6);
        sites.push(json!({
            "systemCodeNumber": site_code(site_num),
            "definitions": [{
                "longDescription": format!("Air quality monitoring site {site_num}"),
                "point": {
                    "latitude": lat,
                    "longitude": lon,
                },
                "lastUpdated": METADATA_TIMESTAMP,
            }],
        }));
    }
    Value::Array(sites)
}

fn site_code(site_num: usize) -> String {
    format!("SITE{site_num:03}")
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
