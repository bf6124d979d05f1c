//! Persistence for the single shared watchlist document.
//!
//! One JSON file holds every chat's list. Mutations run as
//! load -> mutate -> save inside a single-writer critical section, so two
//! overlapping commands cannot silently discard each other's writes.
//! Writes go through a temp file renamed over the target, so an interrupted
//! save never truncates the previous valid document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use watchvault_models::Store;

use crate::migrate;

pub struct StoreRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl StoreRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Read-only snapshot. Takes the write lock briefly so a concurrent
    /// save is never observed half-written.
    pub async fn snapshot(&self) -> Store {
        let _guard = self.write_lock.lock().await;
        self.load_unlocked()
    }

    /// The transaction boundary: lock, load, mutate, save, release. The
    /// closure's return value passes through on success.
    pub async fn update<T>(&self, mutate: impl FnOnce(&mut Store) -> T) -> Result<T> {
        let _guard = self.write_lock.lock().await;
        let mut store = self.load_unlocked();
        let out = mutate(&mut store);
        self.save_unlocked(&store)?;
        Ok(out)
    }

    /// Load and normalize the document. A missing file and any unreadable
    /// or structurally invalid content all load as an empty store; the
    /// engine stays available and the condition is logged, never raised.
    fn load_unlocked(&self) -> Store {
        if !self.path.exists() {
            debug!("Store file {:?} does not exist yet", self.path);
            return Store::new();
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read store file {:?}: {}", self.path, e);
                return Store::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => migrate::normalize_document(value),
            Err(e) => {
                warn!("Store file {:?} is not valid JSON: {}", self.path, e);
                Store::new()
            }
        }
    }

    /// Serialize the whole document. serde_json emits UTF-8 without ASCII
    /// escaping, so accented titles and emoji survive verbatim.
    fn save_unlocked(&self, store: &Store) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create store directory {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(store).context("Failed to serialize store")?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write store temp file {:?}", tmp_path))?;
        std::fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace store file {:?}", self.path))?;

        debug!("Store saved to {:?} ({} chats)", self.path, store.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{add_or_update, chat_items, AddRequest};
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn repo_in(dir: &tempfile::TempDir) -> StoreRepository {
        StoreRepository::new(dir.path().join("data").join("series_data.json"))
    }

    fn req(tmdb_id: u64, title: &str) -> AddRequest {
        AddRequest {
            tmdb_id,
            title: title.to_string(),
            year: None,
            seasons: BTreeSet::new(),
            owner_id: None,
        }
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);
        assert!(repo.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        repo.update(|store| {
            add_or_update(store, "100", req(1, "Dark"));
        })
        .await
        .unwrap();

        let store = repo.snapshot().await;
        assert_eq!(chat_items(&store, "100").len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_bytes_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series_data.json");
        std::fs::write(&path, b"{not json at all").unwrap();

        let repo = StoreRepository::new(path);
        assert!(repo.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_non_object_document_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series_data.json");
        std::fs::write(&path, b"[1, 2, 3]").unwrap();

        let repo = StoreRepository::new(path);
        assert!(repo.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_legacy_shape_loads_via_migration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series_data.json");
        std::fs::write(
            &path,
            r#"{"100": [{"tmdb_id": 1, "title": "Dark", "year": "2017", "completed": [1]}]}"#,
        )
        .unwrap();

        let repo = StoreRepository::new(path);
        let store = repo.snapshot().await;
        assert_eq!(chat_items(&store, "100")[0].completed.len(), 1);
    }

    #[tokio::test]
    async fn test_non_ascii_preserved_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);

        repo.update(|store| {
            add_or_update(store, "100", req(1, "La Casa del Dragón 🐉"));
        })
        .await
        .unwrap();

        let raw = std::fs::read_to_string(dir.path().join("data").join("series_data.json")).unwrap();
        assert!(raw.contains("La Casa del Dragón 🐉"));
        assert!(!raw.contains("\\u"));
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);
        repo.update(|store| {
            add_or_update(store, "100", req(1, "Dark"));
        })
        .await
        .unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("data"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map(|x| x == "tmp").unwrap_or(false))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_updates_serialize() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(repo_in(&dir));

        let mut handles = Vec::new();
        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.update(move |store| {
                    add_or_update(store, "100", req(i, &format!("Series {}", i)));
                })
                .await
                .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Every writer's entry survives: no lost updates.
        let store = repo.snapshot().await;
        assert_eq!(chat_items(&store, "100").len(), 10);
    }
}
