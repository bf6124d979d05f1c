//! Command-level surface consumed by the bot shell.
//!
//! The shell parses commands and renders text; everything returned from
//! here is render-ready data. Catalog access degrades per item when listing
//! and surfaces as "try again" for single-item lookups.

use std::collections::BTreeSet;

use futures::future::join_all;
use tracing::{debug, warn};
use watchvault_catalog::CatalogGateway;
use watchvault_config::StoreOptions;
use watchvault_models::{normalize_title, SeriesMetadata, WatchProviders, WatchlistEntry};

use crate::error::EngineError;
use crate::pagination::{self, ItemRef, Paginator};
use crate::progress::{today_utc, SeriesProgress};
use crate::repository::StoreRepository;
use crate::store::{self, AddOutcome, AddRequest};

/// One rendered page of a chat's watchlist.
#[derive(Debug)]
pub struct PageView {
    pub page: usize,
    pub last_page: usize,
    pub total: usize,
    pub items: Vec<EntryView>,
}

/// A visible list item plus its control token. `progress` is absent when
/// the catalog call for this entry failed; the shell falls back to
/// title/year only.
#[derive(Debug)]
pub struct EntryView {
    pub item_ref: ItemRef,
    pub entry: WatchlistEntry,
    pub progress: Option<SeriesProgress>,
}

/// Detail card for one entry.
#[derive(Debug)]
pub struct EntryDetails {
    pub entry: WatchlistEntry,
    pub title: String,
    pub year: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub progress: SeriesProgress,
}

pub struct WatchlistService<G> {
    repository: StoreRepository,
    gateway: G,
    paginator: Paginator,
    ownership_enabled: bool,
}

impl<G: CatalogGateway> WatchlistService<G> {
    pub fn new(repository: StoreRepository, gateway: G, options: &StoreOptions) -> Self {
        Self {
            repository,
            gateway,
            paginator: Paginator::new(options.page_size),
            ownership_enabled: options.ownership_enabled,
        }
    }

    /// Track a series by catalog id, marking `seasons` completed. Title and
    /// year come from the catalog record.
    pub async fn add_by_id(
        &self,
        chat_id: &str,
        tmdb_id: u64,
        seasons: BTreeSet<u32>,
        owner_id: Option<i64>,
    ) -> Result<(WatchlistEntry, AddOutcome), EngineError> {
        let meta = self.gateway.series_details(tmdb_id).await?;
        let request = AddRequest {
            tmdb_id,
            title: meta.display_title(),
            year: meta.first_air_year(),
            seasons,
            owner_id: self.effective_owner(owner_id),
        };
        self.apply_add(chat_id, request).await
    }

    /// Track a series by title (optionally disambiguated by first-air
    /// year), marking `seasons` completed.
    pub async fn add_by_title(
        &self,
        chat_id: &str,
        title: &str,
        year: Option<&str>,
        seasons: BTreeSet<u32>,
        owner_id: Option<i64>,
    ) -> Result<(WatchlistEntry, AddOutcome), EngineError> {
        if normalize_title(title).is_empty() {
            return Err(EngineError::Validation("search title is empty".into()));
        }

        let results = self.gateway.search_by_title(title).await?;
        let chosen = pick_search_result(&results, year)
            .ok_or_else(|| EngineError::NotFound(format!("no series found for \"{}\"", title)))?;

        let request = AddRequest {
            tmdb_id: chosen.id,
            // Prefer the catalog's title; keep what the user typed when the
            // record has none.
            title: chosen.name.clone().unwrap_or_else(|| title.to_string()),
            year: chosen.first_air_year(),
            seasons,
            owner_id: self.effective_owner(owner_id),
        };
        self.apply_add(chat_id, request).await
    }

    /// Remove the entry matching a raw id or title query. `Ok(false)` when
    /// nothing matched.
    pub async fn remove(&self, chat_id: &str, query: &str) -> Result<bool, EngineError> {
        if query.trim().is_empty() {
            return Err(EngineError::Validation("removal query is empty".into()));
        }
        let chat = chat_id.to_string();
        let query = query.to_string();
        self.repository
            .update(move |store| store::remove(store, &chat, &query))
            .await
            .map_err(EngineError::from)
    }

    /// Remove every entry the member owns. Requires ownership attribution
    /// to be enabled; unattributed entries are never touched.
    pub async fn remove_by_owner(&self, chat_id: &str, owner_id: i64) -> Result<usize, EngineError> {
        if !self.ownership_enabled {
            return Err(EngineError::Validation(
                "ownership attribution is disabled".into(),
            ));
        }
        let chat = chat_id.to_string();
        self.repository
            .update(move |store| store::remove_by_owner(store, &chat, owner_id))
            .await
            .map_err(EngineError::from)
    }

    /// The chat's full list, in insertion order.
    pub async fn list(&self, chat_id: &str) -> Vec<WatchlistEntry> {
        let store = self.repository.snapshot().await;
        store::chat_items(&store, chat_id).to_vec()
    }

    /// One page of the list with per-entry progress. The requested page is
    /// clamped; one catalog call per visible entry runs concurrently, and a
    /// failure degrades only that entry.
    pub async fn list_page(&self, chat_id: &str, page: i64) -> Result<PageView, EngineError> {
        let items = self.list(chat_id).await;
        let total = items.len();
        let page = self.paginator.clamp_page(page, total);
        let bounds = self.paginator.page_bounds(total, page);
        let today = today_utc();

        let fetches = bounds.map(|position| {
            let entry = items[position].clone();
            async move {
                let progress = match self.gateway.series_details(entry.tmdb_id).await {
                    Ok(meta) => Some(SeriesProgress::compute(&meta, &entry.completed, today)),
                    Err(e) => {
                        warn!(
                            "Catalog lookup failed for entry {} in chat {}: {}",
                            entry.tmdb_id, chat_id, e
                        );
                        None
                    }
                };
                EntryView {
                    item_ref: ItemRef {
                        position,
                        tmdb_id: entry.tmdb_id,
                    },
                    entry,
                    progress,
                }
            }
        });
        let views = join_all(fetches).await;

        debug!("Rendered page {} of chat {} ({} items)", page, chat_id, views.len());
        Ok(PageView {
            page,
            last_page: self.paginator.last_page(total),
            total,
            items: views,
        })
    }

    /// Resolve an item control against the current list and build its
    /// detail card. Drift since render is `NotFound`, never a substitute
    /// entry.
    pub async fn resolve_position(
        &self,
        chat_id: &str,
        item_ref: ItemRef,
    ) -> Result<EntryDetails, EngineError> {
        let store = self.repository.snapshot().await;
        let items = store::chat_items(&store, chat_id);
        let entry = pagination::resolve(items, item_ref)
            .ok_or_else(|| EngineError::NotFound("that series is no longer in the list".into()))?
            .clone();

        let meta = self.gateway.series_details(entry.tmdb_id).await?;
        let progress = SeriesProgress::compute(&meta, &entry.completed, today_utc());
        Ok(EntryDetails {
            title: meta.display_title(),
            year: meta.first_air_year().or_else(|| entry.year.clone()),
            overview: meta.overview.clone(),
            poster_path: meta.poster_path.clone(),
            entry,
            progress,
        })
    }

    /// Where-to-watch enrichment, passed through from the catalog.
    pub async fn watch_providers(&self, tmdb_id: u64) -> Result<WatchProviders, EngineError> {
        Ok(self.gateway.watch_providers(tmdb_id).await?)
    }

    fn effective_owner(&self, owner_id: Option<i64>) -> Option<i64> {
        if self.ownership_enabled {
            owner_id
        } else {
            None
        }
    }

    async fn apply_add(
        &self,
        chat_id: &str,
        request: AddRequest,
    ) -> Result<(WatchlistEntry, AddOutcome), EngineError> {
        let chat = chat_id.to_string();
        self.repository
            .update(move |store| store::add_or_update(store, &chat, request))
            .await
            .map_err(EngineError::from)
    }
}

/// Prefer the result whose first-air year matches; otherwise the catalog's
/// first (most relevant) result.
fn pick_search_result<'a>(
    results: &'a [SeriesMetadata],
    year: Option<&str>,
) -> Option<&'a SeriesMetadata> {
    if let Some(year) = year {
        if let Some(hit) = results
            .iter()
            .find(|r| r.first_air_year().as_deref() == Some(year))
        {
            return Some(hit);
        }
    }
    results.first()
}
