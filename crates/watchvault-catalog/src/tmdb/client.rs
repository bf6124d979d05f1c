use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use watchvault_models::{SeriesMetadata, WatchProviders};

use crate::error::CatalogError;
use crate::tmdb::api;
use crate::traits::CatalogGateway;

/// Per-request timeout. A slow catalog call delays the whole page response;
/// there is no cancellation primitive beyond this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    language: String,
}

impl TmdbClient {
    pub fn new(api_key: String, language: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_key,
            language,
        }
    }
}

#[async_trait]
impl CatalogGateway for TmdbClient {
    async fn series_details(&self, id: u64) -> Result<SeriesMetadata, CatalogError> {
        api::tv_details(&self.client, &self.api_key, &self.language, id).await
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<SeriesMetadata>, CatalogError> {
        api::search_tv(&self.client, &self.api_key, &self.language, query).await
    }

    async fn watch_providers(&self, id: u64) -> Result<WatchProviders, CatalogError> {
        api::watch_providers(&self.client, &self.api_key, id).await
    }
}
