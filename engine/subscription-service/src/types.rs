use serde::{Deserialize, Serialize};
use site_catalogue::Reading;

/// One site's entry in a push snapshot: the site code plus the selected
/// reading's channel values and its own timestamp. The timestamp is the
/// reading's, not the simulated "now" — the engine reports when the
/// underlying measurement was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub system_code_number: String,
    #[serde(flatten)]
    pub dynamics: SnapshotDynamics,
}

/// The non-identifying part of a snapshot record; what lands inside a
/// notification's `dynamics` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDynamics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<f64>,
    /// Absolute ISO timestamp of the reading itself
    pub last_updated: String,
}

impl SnapshotRecord {
    /// Build a snapshot record for `site_code` from a selected reading.
    pub fn from_reading(site_code: &str, reading: &Reading) -> Self {
        Self {
            system_code_number: site_code.to_string(),
            dynamics: SnapshotDynamics {
                co: reading.co,
                no: reading.no,
                no2: reading.no2,
                rh: reading.rh,
                temperature: reading.temperature,
                noise: reading.noise,
                battery: reading.battery,
                last_updated: reading.last_updated.to_rfc3339(),
            },
        }
    }
}
