use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base path override from the environment, for containers and tests.
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("MARQUEE_BASE_PATH").ok().map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("marquee");

        Ok(Self::from_base(base_dir))
    }

    /// Config files at the base level, data in a subdir.
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn watchlist_file(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }

        // Platform-specific paths (e.g., ~/.config/marquee on Linux), with a
        // relative fallback for environments without a home directory
        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".marquee")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base_layout() {
        let paths = PathManager::from_base(PathBuf::from("/tmp/marquee-test"));
        assert_eq!(paths.config_dir(), Path::new("/tmp/marquee-test"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/marquee-test/config.toml"));
        assert_eq!(
            paths.watchlist_file("mylist.json"),
            PathBuf::from("/tmp/marquee-test/data/mylist.json")
        );
    }

    #[test]
    fn test_ensure_directories_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().join("base"));
        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().is_dir());
    }
}
