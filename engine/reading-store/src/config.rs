//! Configuration for the reading store.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the static input artifacts live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Per-site reading catalogue
    pub data_path: PathBuf,

    /// Site definition metadata
    pub metadata_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/pollution_data.json"),
            metadata_path: PathBuf::from("data/metadata.json"),
        }
    }
}
