//! Site metadata: static coordinates resolved from the definition
//! catalogue. Independent of the reading catalogue and loaded once.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::CatalogueError;
use crate::types::Coordinates;

#[derive(Deserialize)]
struct MetadataSite {
    #[serde(rename = "systemCodeNumber")]
    system_code_number: String,
    #[serde(default)]
    definitions: Vec<Definition>,
}

#[derive(Deserialize, Default)]
struct Definition {
    #[serde(default)]
    point: Point,
}

/// The definition point may carry easting/northing alongside the resolved
/// latitude/longitude; the engine extracts only the latter.
#[derive(Deserialize, Default)]
struct Point {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Load per-site coordinates from the metadata artifact, keyed by site
/// code. Sites without a resolvable point are skipped.
pub fn load_metadata(path: impl AsRef<Path>) -> Result<HashMap<String, Coordinates>, CatalogueError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let raw: Vec<MetadataSite> = serde_json::from_str(&text)?;

    let mut coordinates = HashMap::with_capacity(raw.len());
    for site in raw {
        let point = site.definitions.into_iter().next().map(|d| d.point).unwrap_or_default();
        match (point.latitude, point.longitude) {
            (Some(lat), Some(lon)) => {
                coordinates.insert(site.system_code_number, Coordinates { lat, lon });
            }
            _ => warn!("Site {} has no resolvable coordinates, skipping", site.system_code_number),
        }
    }

    info!(sites = coordinates.len(), "Preloaded site metadata");
    Ok(coordinates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_metadata(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn extracts_lat_lon_from_first_definition() {
        let json = r#"[
            {"systemCodeNumber": "SITE001", "definitions": [
                {"point": {"easting": 424364.0, "northing": 564561.0,
                           "latitude": 54.9733, "longitude": -1.6178}}
            ]}
        ]"#;
        let file = write_metadata(json);
        let coords = load_metadata(file.path()).unwrap();

        assert_eq!(coords.len(), 1);
        let site = &coords["SITE001"];
        assert_eq!(site.lat, 54.9733);
        assert_eq!(site.lon, -1.6178);
    }

    #[test]
    fn skips_sites_without_a_point() {
        let json = r#"[
            {"systemCodeNumber": "SITE001", "definitions": [{"point": {"easting": 1.0}}]},
            {"systemCodeNumber": "SITE002", "definitions": []},
            {"systemCodeNumber": "SITE003", "definitions": [
                {"point": {"latitude": 55.0, "longitude": -1.6}}
            ]}
        ]"#;
        let file = write_metadata(json);
        let coords = load_metadata(file.path()).unwrap();

        assert_eq!(coords.len(), 1);
        assert!(coords.contains_key("SITE003"));
    }

    #[test]
    fn corrupt_artifact_is_a_json_error() {
        let file = write_metadata("{not json");
        assert!(matches!(load_metadata(file.path()), Err(CatalogueError::Json(_))));
    }
}
