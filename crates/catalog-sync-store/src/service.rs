use catalog_sync_models::{Movie, WatchlistItem, WatchlistPatch};
use chrono::Utc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::watchlist_store::WatchlistStore;

/// Artificial latency applied before every persistence call, standing in
/// for the remote API this layer simulates.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(300);

/// The only component that touches the catalog dataset and the durable
/// watchlist store.
///
/// Every call waits out the artificial latency first, then acts. Watchlist
/// mutations additionally hold `write_guard` across their load/save pair so
/// that concurrent mutations cannot lose each other's writes; the latency
/// sleep stays outside the critical section.
pub struct PersistenceService {
    catalog: Vec<Movie>,
    store: WatchlistStore,
    latency: Duration,
    write_guard: Mutex<()>,
}

impl PersistenceService {
    pub fn new(catalog: Vec<Movie>, store: WatchlistStore) -> Self {
        Self {
            catalog,
            store,
            latency: DEFAULT_LATENCY,
            write_guard: Mutex::new(()),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    async fn simulate_latency(&self) {
        tokio::time::sleep(self.latency).await;
    }

    /// Return the catalog dataset. Infallible: the dataset lives in memory.
    pub async fn fetch_catalog(&self) -> Vec<Movie> {
        self.simulate_latency().await;
        debug!("Catalog fetched: {} titles", self.catalog.len());
        self.catalog.clone()
    }

    /// Read the persisted watchlist. A store that has never been written
    /// yields an empty list.
    pub async fn fetch_watchlist(&self) -> Result<Vec<WatchlistItem>, StoreError> {
        self.simulate_latency().await;
        self.store.load()
    }

    /// Append a fresh membership record for `movie_id` and return it.
    ///
    /// The record id is minted from the current time, not from the stored
    /// collection, and no duplicate check happens here: callers that want
    /// at most one record per movie enforce that when merging the result.
    pub async fn add_watchlist_item(&self, movie_id: u64) -> Result<WatchlistItem, StoreError> {
        self.simulate_latency().await;

        let _guard = self.write_guard.lock().await;
        let mut items = self.store.load()?;

        let now = Utc::now();
        let item = WatchlistItem {
            id: now.timestamp_millis() as u64,
            movie_id,
            watched: false,
            created_at: now,
        };
        items.push(item.clone());
        self.store.save(&items)?;

        debug!("Watchlist item {} added for movie {}", item.id, movie_id);
        Ok(item)
    }

    /// Merge `patch` into the record with `item_id` and return the result.
    pub async fn update_watchlist_item(
        &self,
        item_id: u64,
        patch: WatchlistPatch,
    ) -> Result<WatchlistItem, StoreError> {
        self.simulate_latency().await;

        let _guard = self.write_guard.lock().await;
        let mut items = self.store.load()?;

        let Some(item) = items.iter_mut().find(|i| i.id == item_id) else {
            warn!("Watchlist item {} not found for update", item_id);
            return Err(StoreError::ItemNotFound { id: item_id });
        };
        if let Some(watched) = patch.watched {
            item.watched = watched;
        }
        let updated = item.clone();
        self.store.save(&items)?;

        debug!("Watchlist item {} updated, watched={}", item_id, updated.watched);
        Ok(updated)
    }

    /// Drop the record with `item_id`. An absent id is a successful no-op.
    pub async fn remove_watchlist_item(&self, item_id: u64) -> Result<(), StoreError> {
        self.simulate_latency().await;

        let _guard = self.write_guard.lock().await;
        let mut items = self.store.load()?;

        let before = items.len();
        items.retain(|i| i.id != item_id);
        self.store.save(&items)?;

        debug!("Watchlist item {} removed ({} -> {} items)", item_id, before, items.len());
        Ok(())
    }
}
