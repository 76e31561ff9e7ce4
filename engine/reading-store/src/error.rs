//! Error types for the reading store.

use site_catalogue::CatalogueError;
use thiserror::Error;

/// Errors surfaced by store queries.
///
/// A load failure is distinct from an unknown site: the latter is an empty
/// result, not an error. The store stays queryable with stale or empty
/// state after a failed load attempt.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The catalogue could not be read or parsed; no fresh data is held.
    #[error("failed to load reading catalogue: {0}")]
    CatalogueLoad(#[from] CatalogueError),
}
