//! Catalogue loader: raw JSON reading records into typed in-memory sites.
//!
//! Coercion is per field. A field that fails stays out of the record, the
//! failure is logged and flips the overall `clean` flag, and every
//! remaining field, record and site is still processed.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::error::CatalogueError;
use crate::timefmt;
use crate::types::{CatalogueLoad, Reading, SiteReadings};

#[derive(Deserialize)]
struct RawSite {
    #[serde(rename = "systemCodeNumber")]
    system_code_number: String,
    #[serde(default)]
    dynamics: Vec<Map<String, Value>>,
}

/// Load the per-site reading catalogue from `path`.
///
/// Returns the coerced sites plus a `clean` flag that is `true` iff every
/// field of every record coerced. Partially coerced data is still returned
/// and usable; callers decide whether an unclean load is fatal.
pub fn load_catalogue(path: impl AsRef<Path>) -> Result<CatalogueLoad, CatalogueError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let raw: Vec<RawSite> = serde_json::from_str(&text)?;

    let mut clean = true;
    let mut sites = Vec::with_capacity(raw.len());
    for site in raw {
        let mut readings = Vec::with_capacity(site.dynamics.len());
        for record in &site.dynamics {
            if let Some(reading) = coerce_record(record, &site.system_code_number, &mut clean) {
                readings.push(reading);
            }
        }
        sites.push(SiteReadings { system_code_number: site.system_code_number, readings });
    }

    info!(sites = sites.len(), clean, "Loaded reading catalogue");
    Ok(CatalogueLoad { sites, clean })
}

/// Coerce one raw record. Returns `None` when the record has no usable
/// timestamp and so cannot be placed on a timeline.
fn coerce_record(record: &Map<String, Value>, site: &str, clean: &mut bool) -> Option<Reading> {
    let last_updated = match record.get("lastUpdated") {
        Some(value) => match coerce_timestamp(value) {
            Some(ts) => Some(ts),
            None => {
                error!("Failed to convert lastUpdated at site {site}.");
                *clean = false;
                None
            }
        },
        None => None,
    };

    let Some(last_updated) = last_updated else {
        if !record.is_empty() {
            warn!("Dropping record without a usable lastUpdated at site {site}");
        }
        return None;
    };

    let mut reading = Reading::empty(last_updated);
    reading.co = float_field(record, "co", site, clean);
    reading.no = float_field(record, "no", site, clean);
    reading.no2 = float_field(record, "no2", site, clean);
    reading.temperature = float_field(record, "temperature", site, clean);
    reading.noise = float_field(record, "noise", site, clean);
    reading.battery = float_field(record, "battery", site, clean);
    reading.rh = int_field(record, "rh", site, clean).map(|v| v as f64);
    Some(reading)
}

fn float_field(record: &Map<String, Value>, key: &str, site: &str, clean: &mut bool) -> Option<f64> {
    let value = record.get(key)?;
    match coerce_float(value) {
        Some(v) => Some(v),
        None => {
            error!("Failed to convert {key} at site {site}.");
            *clean = false;
            None
        }
    }
}

fn int_field(record: &Map<String, Value>, key: &str, site: &str, clean: &mut bool) -> Option<i64> {
    let value = record.get(key)?;
    match coerce_int(value) {
        Some(v) => Some(v),
        None => {
            error!("Failed to convert {key} at site {site}.");
            *clean = false;
            None
        }
    }
}

/// Raw channel values arrive as JSON numbers or decimal strings.
fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Integer coercion: decimal strings fail, fractional numbers truncate.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value.as_str().and_then(|s| timefmt::parse_timestamp(s).ok())
}
