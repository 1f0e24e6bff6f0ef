use catalog_sync_config::{Config, PathManager};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use serde_json::json;

use crate::output::{Output, OutputFormat};

pub fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show => show_config(output),
        crate::ConfigCommands::Init => init_config(output),
    }
}

fn show_config(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })?;

    let watchlist_path = match &config.storage.data_dir {
        Some(dir) => dir.join(&config.storage.watchlist_file),
        None => paths.watchlist_file(&config.storage.watchlist_file),
    };

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
            ]);
            table.add_row(vec![
                Cell::new("Config directory"),
                Cell::new(paths.config_dir().display().to_string()),
            ]);
            table.add_row(vec![
                Cell::new("Config file"),
                Cell::new(if config_file.exists() {
                    config_file.display().to_string()
                } else {
                    format!("{} (not found, using defaults)", config_file.display())
                }),
            ]);
            table.add_row(vec![
                Cell::new("Watchlist file"),
                Cell::new(watchlist_path.display().to_string()),
            ]);
            table.add_row(vec![
                Cell::new("Catalog seed"),
                Cell::new(match &config.service.catalog_seed {
                    Some(path) => path.display().to_string(),
                    None => "(built-in)".to_string(),
                }),
            ]);
            table.add_row(vec![
                Cell::new("Service latency"),
                Cell::new(format!("{} ms", config.service.latency_ms)),
            ]);
            table.add_row(vec![
                Cell::new("Notification dismiss"),
                Cell::new(format!("{} ms", config.ui.notification_dismiss_ms)),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);
        }
        _ => {
            let exists = config_file.exists();
            output.json(&json!({
                "configDir": paths.config_dir(),
                "path": config_file,
                "exists": exists,
                "config": config,
            }));
        }
    }

    Ok(())
}

fn init_config(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_file = paths.config_file();

    if config_file.exists() {
        output.info(format!(
            "Config already exists at {}",
            config_file.display()
        ));
        return Ok(());
    }

    paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write config: {}", e))?;

    output.success(format!("Wrote default config to {}", config_file.display()));
    Ok(())
}
