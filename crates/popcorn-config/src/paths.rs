use anyhow::Result;
use std::path::PathBuf;

/// Base directory override taken from `POPCORN_HOME`, if set
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var_os("POPCORN_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("popcorn");
        let data_dir = dirs::data_dir()
            .map(|d| d.join("popcorn"))
            .unwrap_or_else(|| config_dir.join("data"));

        Ok(Self { config_dir, data_dir })
    }

    /// Keep everything under a single directory (used with `POPCORN_HOME` and in tests)
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    /// Durable key-value storage backing the watched list
    pub fn storage_file(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }

        // Platform paths (e.g. ~/.config/popcorn and ~/.local/share/popcorn on Linux),
        // falling back to the working directory when no home can be resolved
        Self::new().unwrap_or_else(|_| Self::from_base(".popcorn"))
    }
}
