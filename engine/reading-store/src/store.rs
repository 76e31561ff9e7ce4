//! Site store: densified per-site timelines plus cached coordinates, with
//! lazy single-populate loading and nearest-timestamp lookup.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tracing::{error, info};

use site_catalogue::{load_catalogue, load_metadata, Coordinates, Reading};

use crate::config::StoreConfig;
use crate::densify::densify;
use crate::error::StoreError;

/// Summary of one catalogue load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Every field across every record coerced cleanly
    pub clean: bool,
    /// Sites loaded
    pub sites: usize,
    /// Densified readings across all sites
    pub readings: usize,
}

/// Read-mostly store of densified reading timelines and site coordinates.
///
/// Construction leaves the store empty; the first query populates it
/// through the Catalogue Loader + Densifier pipeline. The populate path is
/// guarded so concurrent callers trigger at most one full load. `load` may
/// also be called explicitly (and repeatedly); each load fully replaces
/// the in-memory readings.
pub struct ReadingStore {
    config: StoreConfig,

    /// Densified timeline per site code; replaced wholesale on load
    sites: RwLock<HashMap<String, Vec<Reading>>>,

    /// Coordinates per site code; loaded once, immutable thereafter
    metadata: RwLock<HashMap<String, Coordinates>>,

    loaded: AtomicBool,
    load_guard: Mutex<()>,
    metadata_guard: Mutex<()>,
}

impl ReadingStore {
    /// Create an empty store that will read the artifacts named in
    /// `config` on first use.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            sites: RwLock::new(HashMap::new()),
            metadata: RwLock::new(HashMap::new()),
            loaded: AtomicBool::new(false),
            load_guard: Mutex::new(()),
            metadata_guard: Mutex::new(()),
        }
    }

    /// Build a store directly from timelines and metadata, bypassing the
    /// catalogue pipeline. For tests and fixtures.
    pub fn with_data(
        sites: HashMap<String, Vec<Reading>>,
        metadata: HashMap<String, Coordinates>,
    ) -> Self {
        let store = Self::new(StoreConfig::default());
        *store.sites.write() = sites;
        *store.metadata.write() = metadata;
        store.loaded.store(true, Ordering::Release);
        store
    }

    /// (Re)populate the store from the static catalogue. Idempotent; prior
    /// in-memory readings are fully replaced.
    pub fn load(&self) -> Result<LoadReport, StoreError> {
        let _guard = self.load_guard.lock();
        self.load_locked()
    }

    /// Populate on first use. At most one full load runs even when
    /// multiple callers race here.
    fn ensure_loaded(&self) -> Result<(), StoreError> {
        if self.loaded.load(Ordering::Acquire) {
            return Ok(());
        }
        let _guard = self.load_guard.lock();
        if self.loaded.load(Ordering::Acquire) {
            return Ok(());
        }
        self.load_locked().map(|_| ())
    }

    fn load_locked(&self) -> Result<LoadReport, StoreError> {
        let load = load_catalogue(&self.config.data_path)?;

        let mut sites = HashMap::with_capacity(load.sites.len());
        let mut readings = 0;
        for site in load.sites {
            let dense = densify(site.readings);
            readings += dense.len();
            sites.insert(site.system_code_number, dense);
        }

        let site_count = sites.len();
        *self.sites.write() = sites;
        self.loaded.store(true, Ordering::Release);

        if !load.clean {
            error!("Catalogue load finished with coercion failures; partial data kept");
        }
        info!(sites = site_count, readings, clean = load.clean, "Reading store populated");

        Ok(LoadReport { clean: load.clean, sites: site_count, readings })
    }

    /// The single reading closest to `timestamp` in the site's densified
    /// timeline, wrapped in a result list. An unknown site is an empty
    /// list, distinct from a load failure.
    pub fn get_readings(
        &self,
        timestamp: DateTime<Utc>,
        site_code: &str,
    ) -> Result<Vec<Reading>, StoreError> {
        self.ensure_loaded()?;
        let sites = self.sites.read();
        let Some(timeline) = sites.get(site_code) else {
            return Ok(Vec::new());
        };
        Ok(nearest(timeline, timestamp).into_iter().cloned().collect())
    }

    /// The nearest reading to `timestamp` for every site holding at least
    /// one densified reading, in site-code order.
    pub fn nearest_at(
        &self,
        timestamp: DateTime<Utc>,
    ) -> Result<Vec<(String, Reading)>, StoreError> {
        self.ensure_loaded()?;
        let sites = self.sites.read();
        let mut out: Vec<(String, Reading)> = sites
            .iter()
            .filter_map(|(code, timeline)| {
                nearest(timeline, timestamp).map(|r| (code.clone(), r.clone()))
            })
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(out)
    }

    /// Coordinates for one site; `None` for an unknown site.
    pub fn get_coordinates(&self, site_code: &str) -> Option<Coordinates> {
        self.ensure_metadata();
        self.metadata.read().get(site_code).copied()
    }

    /// Coordinates for every known site, in site-code order.
    pub fn get_all_coordinates(&self) -> Vec<(String, Coordinates)> {
        self.ensure_metadata();
        let metadata = self.metadata.read();
        let mut all: Vec<(String, Coordinates)> =
            metadata.iter().map(|(code, coords)| (code.clone(), *coords)).collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        all
    }

    /// Metadata is independent of the reading pipeline; a failed preload
    /// is logged and leaves the cache empty rather than failing queries.
    fn ensure_metadata(&self) {
        if !self.metadata.read().is_empty() {
            return;
        }
        let _guard = self.metadata_guard.lock();
        if !self.metadata.read().is_empty() {
            return;
        }
        match load_metadata(&self.config.metadata_path) {
            Ok(map) => *self.metadata.write() = map,
            Err(e) => error!("Failed to preload site metadata: {e}"),
        }
    }

    #[cfg(test)]
    fn timelines(&self) -> HashMap<String, Vec<Reading>> {
        self.sites.read().clone()
    }
}

/// Closest reading by absolute time distance, at millisecond resolution.
/// Chronological scan keeping the first minimal entry, so an equidistant
/// tie resolves to the earlier reading.
fn nearest(timeline: &[Reading], timestamp: DateTime<Utc>) -> Option<&Reading> {
    timeline.iter().min_by_key(|r| (r.last_updated - timestamp).num_milliseconds().abs())
}
