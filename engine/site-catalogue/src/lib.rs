//! # site-catalogue
//!
//! Typed data model and loaders for the static AirWatch input artifacts:
//! the per-site reading catalogue and the site-definition metadata.
//!
//! The loader coerces every raw field to its declared type with field-level
//! fault isolation: a failing field is dropped and logged without aborting
//! the rest of the load.

pub mod error;
pub mod loader;
pub mod metadata;
pub mod timefmt;
pub mod types;

pub use error::CatalogueError;
pub use loader::load_catalogue;
pub use metadata::load_metadata;
pub use types::{CatalogueLoad, Coordinates, Reading, SiteReadings};
