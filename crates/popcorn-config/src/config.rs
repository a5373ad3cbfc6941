use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub geolocation: GeolocationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OmdbConfig {
    #[serde(default = "default_omdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchConfig {
    /// Queries shorter than this (after trimming) never reach the network
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_watched_key")]
    pub watched_key: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeolocationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_geolocation_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Write logs to this file (rotated daily) instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_omdb_base_url() -> String {
    "https://www.omdbapi.com/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_min_query_length() -> usize {
    3
}

fn default_watched_key() -> String {
    "watched".to_string()
}

fn default_geolocation_endpoint() -> String {
    "https://ipapi.co/json/".to_string()
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_omdb_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_length: default_min_query_length(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            watched_key: default_watched_key(),
        }
    }
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            endpoint: default_geolocation_endpoint(),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty())
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !is_http_url(&self.omdb.base_url) {
            return Err(anyhow::anyhow!("omdb.base_url must be an http(s) URL: {}", self.omdb.base_url));
        }
        if self.omdb.timeout_secs == 0 {
            return Err(anyhow::anyhow!("omdb.timeout_secs must be greater than zero"));
        }
        if self.search.min_query_length == 0 {
            return Err(anyhow::anyhow!("search.min_query_length must be at least 1"));
        }
        if self.storage.watched_key.trim().is_empty() {
            return Err(anyhow::anyhow!("storage.watched_key cannot be empty"));
        }
        if self.geolocation.enabled && !is_http_url(&self.geolocation.endpoint) {
            return Err(anyhow::anyhow!(
                "geolocation.endpoint must be an http(s) URL: {}",
                self.geolocation.endpoint
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.search.min_query_length = 4;
        config.storage.watched_key = "my-watched".to_string();
        config.geolocation.enabled = false;

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.search.min_query_length, 4);
        assert_eq!(loaded.storage.watched_key, "my-watched");
        assert!(!loaded.geolocation.enabled);
        assert_eq!(loaded.omdb.base_url, "https://www.omdbapi.com/");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[search]\nmin_query_length = 2\n").unwrap();
        assert_eq!(config.search.min_query_length, 2);
        assert_eq!(config.omdb.timeout_secs, 10);
        assert_eq!(config.storage.watched_key, "watched");
        assert!(config.geolocation.enabled);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.search.min_query_length, 3);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.omdb.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
        config.omdb.base_url = "https://www.omdbapi.com/".to_string();

        config.search.min_query_length = 0;
        assert!(config.validate().is_err());
        config.search.min_query_length = 3;

        config.storage.watched_key = "  ".to_string();
        assert!(config.validate().is_err());
        config.storage.watched_key = "watched".to_string();

        config.geolocation.endpoint = String::new();
        assert!(config.validate().is_err());
        config.geolocation.enabled = false;
        assert!(config.validate().is_ok());
    }
}
