use async_trait::async_trait;
use watchvault_models::{SeriesMetadata, WatchProviders};

use crate::error::CatalogError;

/// External series catalog. The engine consumes this contract; the concrete
/// TMDB implementation lives in `tmdb`.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Full metadata for a series id. `CatalogError::NotFound` when the id
    /// is unknown to the catalog.
    async fn series_details(&self, id: u64) -> Result<SeriesMetadata, CatalogError>;

    /// Title search, ordered by catalog relevance. Zero results is an empty
    /// vec, not an error.
    async fn search_by_title(&self, query: &str) -> Result<Vec<SeriesMetadata>, CatalogError>;

    /// Region-keyed where-to-watch lists. Optional enrichment.
    async fn watch_providers(&self, id: u64) -> Result<WatchProviders, CatalogError>;
}
