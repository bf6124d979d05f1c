//! Watchlist store operations: merge-on-add, removal, ownership-scoped
//! bulk removal. All functions mutate the in-memory document; the
//! repository wraps them in its load/mutate/save cycle.

use std::collections::BTreeSet;

use tracing::debug;
use watchvault_models::{normalize_title, ChatWatchlist, Store, WatchlistEntry};

#[derive(Debug, Clone)]
pub struct AddRequest {
    pub tmdb_id: u64,
    pub title: String,
    pub year: Option<String>,
    /// Seasons to mark completed, unioned into any existing entry.
    pub seasons: BTreeSet<u32>,
    pub owner_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Updated,
}

/// The chat's entries, in insertion order. Unknown chats read as empty.
pub fn chat_items<'a>(store: &'a Store, chat_id: &str) -> &'a [WatchlistEntry] {
    store.get(chat_id).map(|c| c.items.as_slice()).unwrap_or(&[])
}

/// Add a series to the chat's list, or merge into an existing entry.
///
/// Matching order: same catalog id first, then equal normalized title.
/// On a match the season set grows by union (it never loses a member here),
/// title and year are overwritten with the supplied values, and the owner is
/// claimed by the first writer only. A title match with a different catalog
/// id keeps the stored id: live item controls address entries by it.
pub fn add_or_update(
    store: &mut Store,
    chat_id: &str,
    req: AddRequest,
) -> (WatchlistEntry, AddOutcome) {
    let chat = store.entry(chat_id.to_string()).or_insert_with(ChatWatchlist::default);
    let normalized = normalize_title(&req.title);

    // At most one entry can match either way: ids are unique within a chat
    // and equal titles collapse into one entry on add.
    let position = chat
        .items
        .iter()
        .position(|it| it.tmdb_id == req.tmdb_id)
        .or_else(|| {
            chat.items
                .iter()
                .position(|it| normalize_title(&it.title) == normalized)
        });

    if let Some(idx) = position {
        let entry = &mut chat.items[idx];
        entry.completed.extend(req.seasons.iter().copied());
        entry.title = req.title;
        entry.year = req.year;
        if entry.owner_id.is_none() {
            entry.owner_id = req.owner_id;
        }
        debug!("Updated entry {} in chat {}", entry.tmdb_id, chat_id);
        return (entry.clone(), AddOutcome::Updated);
    }

    let entry = WatchlistEntry {
        tmdb_id: req.tmdb_id,
        title: req.title,
        year: req.year,
        completed: req.seasons,
        owner_id: req.owner_id,
    };
    chat.items.push(entry.clone());
    debug!("Added entry {} to chat {}", entry.tmdb_id, chat_id);
    (entry, AddOutcome::Added)
}

/// Remove the entry matching the query: its stringified catalog id, or its
/// normalized title. At most one entry can match.
pub fn remove(store: &mut Store, chat_id: &str, query: &str) -> bool {
    let Some(chat) = store.get_mut(chat_id) else {
        return false;
    };
    let raw = query.trim();
    let normalized = normalize_title(query);

    let position = chat
        .items
        .iter()
        .position(|it| it.tmdb_id.to_string() == raw || normalize_title(&it.title) == normalized);

    match position {
        Some(idx) => {
            let removed = chat.items.remove(idx);
            debug!("Removed entry {} from chat {}", removed.tmdb_id, chat_id);
            true
        }
        None => false,
    }
}

/// Remove every entry the given member owns. Entries without an owner are
/// never touched: legacy entries stay immune to self-service bulk delete.
pub fn remove_by_owner(store: &mut Store, chat_id: &str, owner_id: i64) -> usize {
    let Some(chat) = store.get_mut(chat_id) else {
        return 0;
    };
    let before = chat.items.len();
    chat.items.retain(|it| it.owner_id != Some(owner_id));
    let removed = before - chat.items.len();
    if removed > 0 {
        debug!("Removed {} entries owned by {} in chat {}", removed, owner_id, chat_id);
    }
    removed
}
