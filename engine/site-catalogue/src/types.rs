use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped measurement bundle for a monitoring site.
///
/// The seven channels are independent scalar measurements. Any channel may
/// be absent when the corresponding raw field failed coercion and was
/// dropped by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Carbon monoxide (mg/m3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co: Option<f64>,
    /// Nitric oxide (ug/m3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<f64>,
    /// Nitrogen dioxide (ug/m3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no2: Option<f64>,
    /// Relative humidity (%). Integer-valued at the source; interpolation
    /// produces fractional values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rh: Option<f64>,
    /// Air temperature (degrees C)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Ambient noise level (dB)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise: Option<f64>,
    /// Sensor battery voltage (V)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<f64>,
    /// When the reading was taken (absolute, timezone-aware)
    pub last_updated: DateTime<Utc>,
}

impl Reading {
    /// A reading at `last_updated` with every channel absent.
    pub fn empty(last_updated: DateTime<Utc>) -> Self {
        Self {
            co: None,
            no: None,
            no2: None,
            rh: None,
            temperature: None,
            noise: None,
            battery: None,
            last_updated,
        }
    }

    /// True when no channel carries a value.
    pub fn is_empty(&self) -> bool {
        self.co.is_none()
            && self.no.is_none()
            && self.no2.is_none()
            && self.rh.is_none()
            && self.temperature.is_none()
            && self.noise.is_none()
            && self.battery.is_none()
    }
}

/// Geographic coordinates of a monitoring site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One site's reading sequence as loaded from the catalogue
/// (pre-densification).
#[derive(Debug, Clone, PartialEq)]
pub struct SiteReadings {
    /// Unique opaque site code (e.g. `SITE001`)
    pub system_code_number: String,
    /// Readings in file order; the densifier sorts by timestamp
    pub readings: Vec<Reading>,
}

/// Result of a catalogue load: the coerced sites plus an overall
/// cleanliness flag.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueLoad {
    pub sites: Vec<SiteReadings>,
    /// `true` iff every field across every record coerced cleanly
    pub clean: bool,
}
