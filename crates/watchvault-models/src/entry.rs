use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One tracked series inside a chat's watchlist.
///
/// Serialized field names match the persisted document schema, which must
/// stay readable across versions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchlistEntry {
    /// Catalog-assigned identity (TMDB id). Unique within one chat's list.
    pub tmdb_id: u64,
    pub title: String,
    /// First-air year as the catalog reports it ("2022"), absent when unknown.
    pub year: Option<String>,
    /// Seasons the chat has marked as fully consumed. Union-only growth.
    #[serde(default)]
    pub completed: BTreeSet<u32>,
    /// Chat member who added the entry. Absent on legacy entries, which makes
    /// them immune to owner-scoped bulk removal.
    #[serde(rename = "user_id", skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
}

impl WatchlistEntry {
    pub fn new(tmdb_id: u64, title: impl Into<String>, year: Option<String>) -> Self {
        Self {
            tmdb_id,
            title: title.into(),
            year,
            completed: BTreeSet::new(),
            owner_id: None,
        }
    }
}

/// A chat's ordered watchlist. Insertion order is preserved; it is the
/// addressing basis for pagination.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatWatchlist {
    #[serde(default)]
    pub items: Vec<WatchlistEntry>,
}

/// The whole persisted document: one watchlist per chat identifier
/// (decimal string). BTreeMap keeps the serialized document stable.
pub type Store = BTreeMap<String, ChatWatchlist>;
