use thiserror::Error;
use watchvault_catalog::CatalogError;

/// Engine-level failure taxonomy. Every variant is a caller-visible outcome;
/// none of them may take the host process down.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Unknown catalog id, empty search results, or a stale pagination
    /// reference. Reported as a plain message.
    #[error("{0}")]
    NotFound(String),

    /// Empty query, unparseable input, out-of-range request. Never mutates
    /// the store.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Transport failure or timeout reaching the catalog. Surfaced as
    /// "try again" for single-item lookups; page rendering degrades
    /// per-item instead of returning this.
    #[error("catalog unavailable: {0}")]
    Gateway(CatalogError),

    /// The persisted document could not be written.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl From<CatalogError> for EngineError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => {
                EngineError::NotFound(format!("series {} not found in catalog", id))
            }
            other => EngineError::Gateway(other),
        }
    }
}
