//! Error types for catalogue loading.

use thiserror::Error;

/// Errors that can occur while loading a static catalogue artifact.
///
/// These are fatal to the load attempt only; callers keep whatever state
/// they already hold.
#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("failed to read catalogue file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalogue JSON: {0}")]
    Json(#[from] serde_json::Error),
}
