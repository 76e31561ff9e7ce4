//! # reading-store
//!
//! The densification pipeline and the site store. Raw catalogue readings
//! are expanded into a 10-second interpolated timeline per site; the store
//! answers nearest-timestamp lookups for arbitrary instants and serves the
//! cached site coordinates. Population is lazy with a single-populate
//! guard, so the first query after a cold start loads the catalogue at
//! most once even under racing callers.

pub mod config;
pub mod densify;
pub mod error;
pub mod store;

pub use config::StoreConfig;
pub use densify::{densify, INTERPOLATION_STEP_SECS};
pub use error::StoreError;
pub use store::{LoadReport, ReadingStore};
