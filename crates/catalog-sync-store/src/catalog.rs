use catalog_sync_models::Movie;
use std::path::Path;
use std::sync::OnceLock;
use tracing::info;

use crate::error::StoreError;

const SEED_JSON: &str = include_str!("../seed/catalog.json");

static SEED: OnceLock<Vec<Movie>> = OnceLock::new();

/// The built-in catalog dataset, parsed once per process.
///
/// The catalog is the ephemeral side of the store: the service hands out
/// copies and catalog mutations only ever touch those copies, so every
/// process starts over from this same dataset.
pub fn seed_catalog() -> &'static [Movie] {
    SEED.get_or_init(|| {
        let movies: Vec<Movie> =
            serde_json::from_str(SEED_JSON).expect("embedded catalog seed is valid JSON");
        info!("Catalog seed parsed: {} titles", movies.len());
        movies
    })
}

/// Load a replacement catalog dataset from a JSON file.
pub fn load_seed_file(path: &Path) -> Result<Vec<Movie>, StoreError> {
    let content = std::fs::read_to_string(path)?;
    let movies: Vec<Movie> = serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Catalog seed loaded: {} titles from {:?}", movies.len(), path);
    Ok(movies)
}
