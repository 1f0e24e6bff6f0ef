pub mod browse;
pub mod config;
pub mod list;
pub mod movie;
pub mod prompts;
pub mod show;

use catalog_sync_config::{Config, PathManager};
use catalog_sync_core::StateOrchestrator;
use catalog_sync_store::{load_seed_file, seed_catalog, PersistenceService, WatchlistStore};
use color_eyre::Result;

use crate::output::Output;

/// Boot the way the app does: assemble the service, then run both initial
/// loads. Returns None after printing the error screen if a load failed.
pub(crate) async fn bootstrap_session(output: &Output) -> Result<Option<StateOrchestrator>> {
    let orchestrator = build_orchestrator()?;

    orchestrator.load_catalog().await;
    orchestrator.load_watchlist().await;

    let snapshot = orchestrator.snapshot();
    if let Some(error) = &snapshot.last_error {
        output.error(error);
        return Ok(None);
    }

    Ok(Some(orchestrator))
}

fn build_orchestrator() -> Result<StateOrchestrator> {
    let paths = PathManager::default();
    let config = Config::load_or_default(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config: {}", e))?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid config: {}", e))?;

    let watchlist_path = match &config.storage.data_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            dir.join(&config.storage.watchlist_file)
        }
        None => {
            paths
                .ensure_directories()
                .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
            paths.watchlist_file(&config.storage.watchlist_file)
        }
    };

    let catalog = match &config.service.catalog_seed {
        Some(path) => load_seed_file(path)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load catalog seed: {}", e))?,
        None => seed_catalog().to_vec(),
    };

    tracing::debug!(
        "Session ready: {} catalog titles, watchlist at {:?}",
        catalog.len(),
        watchlist_path
    );

    let service = PersistenceService::new(catalog, WatchlistStore::new(watchlist_path))
        .with_latency(config.latency());

    Ok(StateOrchestrator::new(service).with_dismiss_delay(config.dismiss_delay()))
}
