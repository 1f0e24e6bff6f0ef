use catalog_sync_models::WatchlistItem;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::StoreError;

/// The durable watchlist leaf: one JSON file holding the whole collection,
/// read and written wholesale.
///
/// The leaf itself does no locking. Two callers that interleave their
/// load/save pairs will lose one of the updates; `PersistenceService`
/// serializes its mutations for exactly that reason.
pub struct WatchlistStore {
    path: PathBuf,
}

impl WatchlistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole collection. A missing file is an empty list; a file
    /// that exists but does not deserialize is an error.
    pub fn load(&self) -> Result<Vec<WatchlistItem>, StoreError> {
        if !self.path.exists() {
            debug!("Watchlist file does not exist, starting empty: {:?}", self.path);
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Vec<WatchlistItem>>(&content) {
            Ok(items) => {
                debug!("Watchlist loaded: {} items from {:?}", items.len(), self.path);
                Ok(items)
            }
            Err(e) => {
                warn!("Watchlist data corrupt at {:?}: {}", self.path, e);
                Err(StoreError::Corrupt {
                    path: self.path.clone(),
                    source: e,
                })
            }
        }
    }

    /// Replace the whole collection on disk.
    pub fn save(&self, items: &[WatchlistItem]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(items).map_err(StoreError::Serialize)?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, json)?;
        std::fs::rename(&temp_path, &self.path)?;

        debug!("Watchlist saved: {} items to {:?}", items.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_item(id: u64, movie_id: u64) -> WatchlistItem {
        WatchlistItem {
            id,
            movie_id,
            watched: false,
            created_at: Utc::now(),
        }
    }

    fn create_store(dir: &TempDir) -> WatchlistStore {
        WatchlistStore::new(dir.path().join("mylist.json"))
    }

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dir = TempDir::new().unwrap();
        let store = create_store(&dir);

        let items = store.load().unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = create_store(&dir);

        let items = vec![create_item(1, 10), create_item(2, 20)];
        store.save(&items).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, items);
    }

    #[test]
    fn test_load_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = create_store(&dir);

        std::fs::write(store.path(), "not json at all").unwrap();

        match store.load() {
            Err(StoreError::Corrupt { path, .. }) => assert_eq!(path, store.path()),
            other => panic!("expected Corrupt error, got {:?}", other),
        }
    }

    #[test]
    fn test_save_creates_parent_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = WatchlistStore::new(dir.path().join("nested").join("mylist.json"));

        store.save(&[create_item(1, 10)]).unwrap();

        assert!(store.path().exists());
        assert!(!store.path().with_extension("tmp").exists());
    }

    // The leaf is deliberately unsynchronized: interleaved load/save pairs
    // exhibit the classic lost update. The service layer exists to prevent
    // callers from ever running this interleaving.
    #[test]
    fn test_interleaved_read_modify_write_loses_an_update() {
        let dir = TempDir::new().unwrap();
        let store = create_store(&dir);

        store.save(&[create_item(1, 10)]).unwrap();

        let mut first = store.load().unwrap();
        let mut second = store.load().unwrap();

        first.push(create_item(2, 20));
        store.save(&first).unwrap();

        second.push(create_item(3, 30));
        store.save(&second).unwrap();

        let final_items = store.load().unwrap();
        let movie_ids: Vec<u64> = final_items.iter().map(|i| i.movie_id).collect();
        assert_eq!(movie_ids, vec![10, 30], "the write based on the stale read wins");
    }
}
