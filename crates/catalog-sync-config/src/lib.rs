pub mod config;
pub mod paths;

pub use config::{Config, ServiceConfig, StorageConfig, UiConfig};
pub use paths::{PathManager, base_path_override};
