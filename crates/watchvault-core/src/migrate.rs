//! Legacy-shape normalization for the persisted document.
//!
//! Older deployments wrote several shapes to disk; all of them must remain
//! loadable indefinitely. The supported shapes are an explicit list:
//!
//! - current: `{"<chat>": {"items": [entry...]}}`
//! - bare list: `{"<chat>": [entry...]}`
//! - object without items: `{"<chat>": {...}}` (items defaults to empty)
//!
//! Anything that is not a JSON object at the top level loads as an empty
//! store. Individual entries that fail to parse are dropped, not fatal.

use serde_json::Value;
use tracing::warn;
use watchvault_models::{ChatWatchlist, Store, WatchlistEntry};

pub fn normalize_document(value: Value) -> Store {
    let Value::Object(chats) = value else {
        warn!("Persisted document is not an object; starting from an empty store");
        return Store::new();
    };

    let mut store = Store::new();
    for (chat_id, chat_value) in chats {
        let items_value = match chat_value {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("items") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => {
                warn!("Chat {} has an unrecognized shape; resetting to empty", chat_id);
                Vec::new()
            }
        };

        let items: Vec<WatchlistEntry> = items_value
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Dropping unreadable entry in chat {}: {}", chat_id, e);
                    None
                }
            })
            .collect();

        store.insert(chat_id, ChatWatchlist { items });
    }
    store
}
