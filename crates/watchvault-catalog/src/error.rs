use thiserror::Error;

/// Failures reaching or interpreting the external catalog.
///
/// `NotFound` is a normal outcome (unknown id); everything else is a
/// transport-level problem callers degrade or retry on.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("series {0} not found in catalog")]
    NotFound(u64),

    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog returned status {0}")]
    Status(u16),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}
