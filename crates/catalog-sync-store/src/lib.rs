pub mod catalog;
pub mod error;
pub mod service;
pub mod watchlist_store;

pub use catalog::{load_seed_file, seed_catalog};
pub use error::StoreError;
pub use service::{PersistenceService, DEFAULT_LATENCY};
pub use watchlist_store::WatchlistStore;
