use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use watchvault_models::{SeriesMetadata, WatchProviders};

use crate::error::CatalogError;

// TMDB API base URL
const API_BASE: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SeriesMetadata>,
}

/// GET /tv/{id}: full series record including seasons and next episode.
pub async fn tv_details(
    client: &Client,
    api_key: &str,
    language: &str,
    id: u64,
) -> Result<SeriesMetadata, CatalogError> {
    let url = format!("{}/tv/{}", API_BASE, id);
    let response = client
        .get(&url)
        .query(&[("api_key", api_key), ("language", language)])
        .send()
        .await?;

    if response.status().as_u16() == 404 {
        return Err(CatalogError::NotFound(id));
    }
    if !response.status().is_success() {
        return Err(CatalogError::Status(response.status().as_u16()));
    }

    let details: SeriesMetadata = response.json().await?;
    debug!("Fetched catalog details for series {}", id);
    Ok(details)
}

/// GET /search/tv: title search. Results carry only the summary fields
/// (id, names, first air date); season data requires a details call.
pub async fn search_tv(
    client: &Client,
    api_key: &str,
    language: &str,
    query: &str,
) -> Result<Vec<SeriesMetadata>, CatalogError> {
    let url = format!("{}/search/tv", API_BASE);
    let response = client
        .get(&url)
        .query(&[("api_key", api_key), ("language", language), ("query", query)])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(CatalogError::Status(response.status().as_u16()));
    }

    let parsed: SearchResponse = response.json().await?;
    debug!("Catalog search for {:?} returned {} results", query, parsed.results.len());
    Ok(parsed.results)
}

/// GET /tv/{id}/watch/providers: region-keyed availability lists.
pub async fn watch_providers(
    client: &Client,
    api_key: &str,
    id: u64,
) -> Result<WatchProviders, CatalogError> {
    let url = format!("{}/tv/{}/watch/providers", API_BASE, id);
    let response = client
        .get(&url)
        .query(&[("api_key", api_key)])
        .send()
        .await?;

    if response.status().as_u16() == 404 {
        return Err(CatalogError::NotFound(id));
    }
    if !response.status().is_success() {
        return Err(CatalogError::Status(response.status().as_u16()));
    }

    Ok(response.json().await?)
}
